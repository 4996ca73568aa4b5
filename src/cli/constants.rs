// cli/constants.rs: program identity strings for the `b2` binary.

pub const COMPRESSOR_NAME: &str = "b2";

/// Banner shown at display level 3 and above.
pub fn welcome_message() -> String {
    format!(
        "*** {} : ByteBoozer v{} cruncher, {}-bit ***\n",
        COMPRESSOR_NAME,
        crate::B2_VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8
    )
}
