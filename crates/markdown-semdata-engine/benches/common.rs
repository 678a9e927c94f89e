// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_annotated_markdown(size: usize) -> String {
    let base = "# Reading list\n\n%%dc:author :: Sherry Turkle | Turkle's%% %%dc:title::Second Self%% was an early book on the social aspects of computation.\n\n- %%schema:Book::schema:name :: The Second Self%%\n- plain item without annotations\n\n```text\n%%not::rewritten%%\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_plain_markdown(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content, 100% plain.\n\n- Bullet point\n  - Nested item\n- Another item\n\n";
    base.repeat(size)
}
