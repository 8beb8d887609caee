use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use serde::Serialize;

/// Writes `value` as pretty JSON to `path`, or to stdout when no path is given.
///
/// Missing parent directories of `path` are created.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
{
    let Some(path) = path else {
        return write_json(io::stdout().lock(), value).context("Failed to write JSON to stdout");
    };
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_json(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))
}

fn write_json<W, T>(mut writer: W, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use rand::Rng as _;

    use super::*;

    #[test]
    fn test_json_ends_with_newline() {
        let mut buf = Vec::new();
        write_json(&mut buf, &serde_json::json!({ "score": 42 })).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        assert_eq!(serde_json::from_str::<serde_json::Value>(&text).unwrap()["score"], 42);
    }

    #[test]
    fn test_save_json_creates_directories() {
        let tag: u64 = rand::rng().random();
        let dir = std::env::temp_dir().join(format!("oxiblast-util-{tag:016x}"));
        let path = dir.join("reports").join("report.json");

        save_json(&[1, 2, 3], Some(&path)).unwrap();
        let value: Vec<u32> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, [1, 2, 3]);

        fs::remove_dir_all(&dir).unwrap();
    }
}
