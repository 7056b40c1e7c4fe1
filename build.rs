use anyhow::Result;
use vergen::EmitBuilder;

fn main() -> Result<()> {
    EmitBuilder::builder()
        .git_sha(true)
        .git_commit_date()
        .emit()?;

    println!("cargo:rerun-if-env-changed=LIBDIVECOMPUTER_LIB_DIR");

    // Link against the system libdivecomputer only when the FFI backend is built
    if std::env::var_os("CARGO_FEATURE_LIBDIVECOMPUTER").is_some() {
        if let Some(dir) = std::env::var_os("LIBDIVECOMPUTER_LIB_DIR") {
            println!(
                "cargo:rustc-link-search=native={}",
                std::path::Path::new(&dir).display()
            );
        }
        println!("cargo:rustc-link-lib=divecomputer");
    }

    Ok(())
}
