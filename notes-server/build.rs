fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=../proto/notes.proto");

    // The client half is only used by the end-to-end tests.
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["../proto/notes.proto"], &["../proto"])?;
    Ok(())
}
