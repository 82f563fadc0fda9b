//! Diagnostic rendering of vectors.

use std::io::Write;

use crate::{AsView, Element, Result, Vector, VectorView, VectorViewMut};

/// Format like C's `%e`: six fractional digits, signed two-digit exponent.
pub fn format_scientific(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let formatted = format!("{:.6e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => formatted,
    }
}

impl<T: Element> VectorView<'_, T> {
    /// Every element as `%e` followed by one space, then a newline.
    pub fn render(&self) -> Result<String> {
        let host = self.to_host_vec()?;
        let mut out = String::with_capacity(host.len() * 14 + 1);
        for v in &host {
            out.push_str(&format_scientific(v.to_f64()));
            out.push(' ');
        }
        out.push('\n');
        Ok(out)
    }

    /// Write [`render`](Self::render) to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(self.render()?.as_bytes())?;
        Ok(())
    }

    /// Write [`render`](Self::render) to standard error.
    pub fn print(&self) -> Result<()> {
        self.write_to(std::io::stderr().lock())
    }
}

impl<T: Element> VectorViewMut<'_, T> {
    pub fn render(&self) -> Result<String> {
        self.as_view().render()
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        self.as_view().write_to(writer)
    }

    pub fn print(&self) -> Result<()> {
        self.as_view().print()
    }
}

impl<T: Element> Vector<T> {
    pub fn render(&self) -> Result<String> {
        self.as_view().render()
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        self.as_view().write_to(writer)
    }

    /// Write the vector to standard error, one `%e` value per element.
    pub fn print(&self) -> Result<()> {
        self.as_view().print()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Device;

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(6.0), "6.000000e+00");
        assert_eq!(format_scientific(0.0), "0.000000e+00");
        assert_eq!(format_scientific(-1234.5), "-1.234500e+03");
        assert_eq!(format_scientific(1.5e-7), "1.500000e-07");
        assert_eq!(format_scientific(2.0e150), "2.000000e+150");
        assert_eq!(format_scientific(f64::NAN), "nan");
        assert_eq!(format_scientific(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_render() {
        let v = Vector::from_host(Device::Cpu, &[1.0f32, 2.5]).unwrap();
        assert_eq!(v.render().unwrap(), "1.000000e+00 2.500000e+00 \n");
    }

    #[test]
    fn test_render_strided_view() {
        let v = Vector::from_host(Device::Cpu, &[1.0f64, 9.0, 3.0]).unwrap();
        assert_eq!(v.strided(2).render().unwrap(), "1.000000e+00 3.000000e+00 \n");
    }

    #[test]
    fn test_render_empty() {
        let v = Vector::<f64>::allocate(Device::Cpu, 0).unwrap();
        assert_eq!(v.render().unwrap(), "\n");
    }

    #[test]
    fn test_write_to_buffer() {
        let v = Vector::from_host(Device::Cpu, &[-3.0f64]).unwrap();
        let mut buf = Vec::new();
        v.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "-3.000000e+00 \n");
    }

    #[test]
    fn test_every_element_followed_by_space() {
        let v = Vector::from_host(Device::Cpu, &[6.0f64, 6.0]).unwrap();
        assert_eq!(v.render().unwrap(), "6.000000e+00 6.000000e+00 \n");
    }

    #[test]
    fn test_write_to_from_mutable_view() {
        let mut v = Vector::from_host(Device::Cpu, &[1.0f32, 2.0, 3.0]).unwrap();
        let view = v.subvector_mut(1, 2);
        let mut buf = Vec::new();
        view.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "2.000000e+00 3.000000e+00 \n");
    }
}
