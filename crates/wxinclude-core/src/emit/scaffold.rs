//! Include guard and helper macro boilerplate.

use crate::VERSION;
use std::fmt::Write as FmtWrite;

/// Tool banner written into the metadata comment
pub const TOOL_INFO: &str = "wxInclude by Kim De Deyn, use --help for more information.";

/// Writes the metadata comment and the opening include guard
///
/// The guard symbol is the uppercased header name followed by `_H`.
pub fn guard_open(out: &mut String, header_name: &str, use_macros: bool, use_const: bool) {
    let guard = header_name.to_uppercase();

    // Writing to a String cannot fail
    let _ = write!(
        out,
        "/*\n\
         \x20 Automatically generated header by:\n\
         \n\
         \x20   {info}\n\
         \x20   Version {version}\n\
         \n\
         \x20 Header: {header}\n\
         \x20 Macros: {macros}\n\
         \x20 Const: {constant}\n\
         */\n\
         \n\
         #ifndef {guard}_H\n\
         #define {guard}_H\n\
         \n",
        info = TOOL_INFO,
        version = VERSION,
        header = header_name,
        macros = yes_no(use_macros),
        constant = yes_no(use_const),
        guard = guard,
    );
}

/// Writes the closing include guard
pub fn guard_close(out: &mut String) {
    out.push_str("#endif\n\n");
}

/// Writes the helper include lines, macros and conversion functions
pub fn helper_macros(out: &mut String, include_name: &str, include_memory_stream: bool) {
    let _ = writeln!(out, "#include \"{}\"", include_name);
    if include_memory_stream {
        let _ = writeln!(out, "#include \"{}\"", crate::options::MEMORY_STREAM_INCLUDE);
    }
    out.push('\n');
    out.push_str(HELPER_TEMPLATE);
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

const HELPER_TEMPLATE: &str = "\
#define wxMEMORY_IMAGE( name ) _wxConvertMemoryToImage( name, sizeof( name ) )
#define wxMEMORY_IMAGEEX( name, type ) _wxConvertMemoryToImage( name, sizeof( name ), type )
#define wxMEMORY_BITMAP( name ) _wxConvertMemoryToBitmap( name, sizeof( name ) )
#define wxMEMORY_BITMAPEX( name, type ) _wxConvertMemoryToBitmap( name, sizeof( name ), type )

inline wxImage _wxConvertMemoryToImage(const unsigned char* data, int length, wxBitmapType type = wxBITMAP_TYPE_ANY )
{
    wxMemoryInputStream stream( data, length );
    return wxImage( stream, type, -1 );
}

inline wxBitmap _wxConvertMemoryToBitmap(const unsigned char* data, int length, wxBitmapType type = wxBITMAP_TYPE_ANY )
{
    wxMemoryInputStream stream( data, length );
    return wxBitmap( wxImage( stream, type, -1 ), -1 );
}

";
