//! Build script for storefront crate.
//!
//! Computes content hashes for the static assets so templates can append a
//! cache-busting `?v=` query to their URLs.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Static assets and the compile-time variable their hash is exported as.
const ASSETS: &[(&str, &str)] = &[
    ("static/css/main.css", "CSS_HASH"),
    ("static/js/cart.js", "JS_HASH"),
];

fn main() {
    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR is not set; asset hashes disabled");
        for (_, var) in ASSETS {
            println!("cargo:rustc-env={var}=");
        }
        return;
    };

    for (relative, var) in ASSETS {
        hash_asset(&Path::new(&manifest_dir).join(relative), var);
    }
}

/// Export the first 8 hex chars of the file's SHA-256 as `var`.
///
/// A missing file exports an empty hash.
fn hash_asset(path: &Path, var: &str) {
    println!("cargo:rerun-if-changed={}", path.display());

    match fs::read(path) {
        Ok(content) => {
            let hash = format!("{:x}", Sha256::digest(&content));
            let short_hash = hash.get(..8).unwrap_or_default();
            println!("cargo:rustc-env={var}={short_hash}");
        }
        Err(e) => {
            println!("cargo:warning=Could not read {}: {e}", path.display());
            println!("cargo:rustc-env={var}=");
        }
    }
}
