//! Site constants generated from `site.toml` by the build script.

include!(concat!(env!("OUT_DIR"), "/site_config.rs"));
