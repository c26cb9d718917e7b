use incbin_codegen::{Builder, ElementType};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    let report = Builder::from_env()?
        .embed("Lorem", "data/loremipsum.txt")
        .embed("Onebyte", "data/onebyte.txt")
        .embed("Sevenbytes", "data/sevenbytes.txt")
        .embed("Empty", "data/empty.bin")
        .embed_typed("CharLorem", "data/loremipsum.txt", ElementType::Char)
        .embed_typed("CharOnebyte", "data/onebyte.txt", ElementType::Char)
        .embed_typed("CharSevenbytes", "data/sevenbytes.txt", ElementType::Char)
        .embed_text("TLorem", "data/loremipsum.txt")
        .build()?;

    if std::env::var_os("INCBIN_REPORT").is_some() {
        println!("cargo:warning={}", report.to_string().replace('\n', " | "));
    }
    Ok(())
}
