//! Chunk a Markdown document and print the chunks as JSON.
//!
//! ```bash
//! cargo run --example chunk_file                          # built-in sample
//! cargo run --example chunk_file -- guide.md              # a file
//! cargo run --example chunk_file -- guide.md config.json  # with a JSON config
//! RUST_LOG=danraku=debug cargo run --example chunk_file   # see split decisions
//! ```

use std::error::Error;
use std::fs;

use danraku::{ChunkConfig, DocumentChunker};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "---
title: \"入学案内\"
category: admissions
---
# 募集要項

本学では、情報分野の専門職を目指す学生を募集しています。募集人員は学科ごとに定められています。

## 出願資格

- 高等学校を卒業した者、または卒業見込みの者
- 文部科学大臣の定めるところにより、これと同等以上の学力があると認められた者

## 試験日程

```text
出願期間: 10月1日〜10月15日
試験日:   11月3日
```

# 学費について

授業料は年額で定められています。分納も可能です。詳しくは学生課までお問い合わせください。
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let document = match args.next() {
        Some(path) => fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };
    let config = match args.next() {
        Some(path) => ChunkConfig::from_json(&fs::read_to_string(path)?)?,
        None => ChunkConfig::builder().min_tokens(20).build()?,
    };

    let chunks = DocumentChunker::new(config).chunk(&document)?;

    eprintln!("{} chunks", chunks.len());
    println!("{}", serde_json::to_string_pretty(&chunks)?);

    Ok(())
}
