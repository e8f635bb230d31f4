//! Demo binary entrypoint (requires the `gui` feature).

fn main() -> eframe::Result<()> {
    quillkit::run()
}
