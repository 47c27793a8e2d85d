//! Console output macros. All user-facing text goes through `tr!` so every
//! message stays translatable; commands never call `println!` directly.

/// Fetches a localized message from the embedded Fluent catalogs.
#[macro_export]
macro_rules! tr {
    ($key:expr $(, $name:ident = $value:expr)* $(,)?) => {{
        let loader = $crate::LANG_LOADER.get().expect("i18n not initialized");
        i18n_embed_fl::fl!(loader, $key $(, $name = $value)*)
    }};
}

/// Success line on stdout, prefixed with a check mark.
#[macro_export]
macro_rules! ui_ok {
    ($key:expr $(, $name:ident = $value:expr)* $(,)?) => {
        println!("✔ {}", $crate::tr!($key $(, $name = $value)*))
    };
}

/// Progress note on stderr so stdout stays parseable.
#[macro_export]
macro_rules! ui_info {
    ($key:expr $(, $name:ident = $value:expr)* $(,)?) => {
        eprintln!("ℹ {}", $crate::tr!($key $(, $name = $value)*))
    };
}

/// Non-fatal problem on stderr.
#[macro_export]
macro_rules! ui_warn {
    ($key:expr $(, $name:ident = $value:expr)* $(,)?) => {
        eprintln!("⚠ {}", $crate::tr!($key $(, $name = $value)*))
    };
}

/// Fatal problem on stderr.
#[macro_export]
macro_rules! ui_err {
    ($key:expr $(, $name:ident = $value:expr)* $(,)?) => {
        eprintln!("✖ {}", $crate::tr!($key $(, $name = $value)*))
    };
}

/// Plain localized line on stdout, no prefix.
#[macro_export]
macro_rules! ui_out {
    ($key:expr $(, $name:ident = $value:expr)* $(,)?) => {
        println!("{}", $crate::tr!($key $(, $name = $value)*))
    };
}
