//! Parameter descriptions exposed to the host.

/// FFGL parameter value types used by these plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Continuous 0..1 float.
    Standard,
    /// Momentary trigger; the host sends 1.0 on press.
    Event,
    /// Free text, marshalled as a C string pointer.
    Text,
}

impl ParamType {
    pub fn code(self) -> u32 {
        match self {
            ParamType::Standard => 10,
            ParamType::Event => 1,
            ParamType::Text => 100,
        }
    }
}

/// Static description of one host-visible parameter.
#[derive(Debug, Clone, Copy)]
pub struct SimpleParamInfo {
    pub name: &'static str,
    pub ty: ParamType,
    /// Default for float-valued types; ignored for [`ParamType::Text`].
    pub default: f32,
}

/// FFGL parameter names are fixed 16-byte buffers, NUL-padded, not
/// necessarily NUL-terminated. Over-long names are cut at 16 bytes.
pub fn padded_name(name: &str) -> [u8; 16] {
    let mut buf = [0u8; 16];
    let bytes = name.as_bytes();
    let len = bytes.len().min(16);
    buf[..len].copy_from_slice(&bytes[..len]);
    buf
}
