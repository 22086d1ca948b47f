//! Build script for sickle-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Parses and validates tool.toml, then embeds it as postcard bytes

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sickle_core::ToolConfig;

/// Encoded configuration file name under OUT_DIR
const CONFIG_BIN: &str = "tool_config.bin";

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    embed_config(&out_dir);
}

fn setup_linker(out_dir: &Path) {
    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Fail the build with a framed message
fn config_error(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ==================================================================\n\
        tool.toml: {}\n\
        ------------------------------------------------------------------\n\
        {}\n\
        ==================================================================\n",
        title, detail
    );
}

fn embed_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=tool.toml");

    let path = Path::new("tool.toml");
    let config = if path.exists() {
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| config_error("could not be read", &e.to_string()));
        toml::from_str::<ToolConfig>(&content)
            .unwrap_or_else(|e| config_error("invalid configuration", &e.to_string()))
    } else {
        println!("cargo:warning=tool.toml not found, using built-in defaults");
        ToolConfig::default()
    };

    if let Err(e) = config.validate() {
        config_error("rejected", &format!("{:?}", e));
    }

    let mut buf = [0u8; 256];
    let bytes = postcard::to_slice(&config, &mut buf)
        .unwrap_or_else(|e| config_error("could not be encoded", &e.to_string()));
    fs::write(out_dir.join(CONFIG_BIN), &*bytes).unwrap();
}
