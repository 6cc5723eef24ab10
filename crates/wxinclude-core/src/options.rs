//! Options controlling a single conversion run.

/// Header included by the helper macros when no other one is chosen
pub const DEFAULT_HELPER_INCLUDE: &str = "wx/wx.h";

/// Secondary header pulled in alongside [`DEFAULT_HELPER_INCLUDE`]
pub const MEMORY_STREAM_INCLUDE: &str = "wx/mstream.h";

/// Configuration for one conversion run
///
/// All flags are independent of each other; every combination is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Wrap the output in an include guard with a metadata comment
    pub header_guard: bool,
    /// Emit the wxWidgets helper macros and conversion functions
    pub helper_macros: bool,
    /// Declare arrays as `static const`
    pub use_const: bool,
    /// Keep identifier case and match extension masks case-sensitively
    pub respect_case: bool,
    /// Append the file extension to the identifier (`logo_png`)
    pub append_type: bool,
    /// Header included by the helper macros (`None` = default header)
    pub helper_include: Option<String>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            header_guard: true,
            helper_macros: true,
            use_const: false,
            respect_case: false,
            append_type: false,
            helper_include: None,
        }
    }
}

impl ConversionOptions {
    /// Creates options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to emit the include guard
    pub fn header_guard(mut self, enabled: bool) -> Self {
        self.header_guard = enabled;
        self
    }

    /// Sets whether to emit the helper macros
    pub fn helper_macros(mut self, enabled: bool) -> Self {
        self.helper_macros = enabled;
        self
    }

    /// Sets whether arrays are declared const
    pub fn use_const(mut self, enabled: bool) -> Self {
        self.use_const = enabled;
        self
    }

    /// Sets whether case is preserved
    pub fn respect_case(mut self, enabled: bool) -> Self {
        self.respect_case = enabled;
        self
    }

    /// Sets whether the extension is appended to identifiers
    pub fn append_type(mut self, enabled: bool) -> Self {
        self.append_type = enabled;
        self
    }

    /// Sets the header included by the helper macros
    pub fn helper_include(mut self, include: impl Into<String>) -> Self {
        self.helper_include = Some(include.into());
        self
    }

    /// The header the helper macros include
    pub fn include_name(&self) -> &str {
        self.helper_include.as_deref().unwrap_or(DEFAULT_HELPER_INCLUDE)
    }

    /// Whether the memory stream header is included as well
    ///
    /// Only the default helper header gets it; a custom header is assumed
    /// to pull in whatever it needs.
    pub fn include_memory_stream(&self) -> bool {
        self.helper_include.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ConversionOptions::new()
            .header_guard(false)
            .helper_macros(false)
            .use_const(true)
            .respect_case(true)
            .append_type(true);

        assert!(!options.header_guard);
        assert!(!options.helper_macros);
        assert!(options.use_const);
        assert!(options.respect_case);
        assert!(options.append_type);
    }

    #[test]
    fn test_helper_include_defaulting() {
        let options = ConversionOptions::default();
        assert_eq!(options.include_name(), "wx/wx.h");
        assert!(options.include_memory_stream());

        // Naming the default header explicitly still counts as a custom choice
        let options = ConversionOptions::new().helper_include("wx/wx.h");
        assert_eq!(options.include_name(), "wx/wx.h");
        assert!(!options.include_memory_stream());

        let options = ConversionOptions::new().helper_include("wx/wxprec.h");
        assert_eq!(options.include_name(), "wx/wxprec.h");
    }
}
