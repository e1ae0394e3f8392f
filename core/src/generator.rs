//! The generation loop.
//!
//! Validates the inputs, settles the target directory (creating it or
//! asking to reuse it), then consumes the trait table one uniformly random
//! row at a time: copy the row's asset to `<index>.png`, render the
//! template, write `<index>.json`. Indices are sequential and increment
//! every iteration whether or not the asset copy happened.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::confirm::Confirm;
use crate::error::{GenerateError, Result};
use crate::template::MetadataTemplate;
use crate::trait_table::TraitTable;

/// Input and output paths plus the item cap.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub metadata_csv: PathBuf,
    pub metadata_template: PathBuf,
    pub asset_dir: PathBuf,
    pub target_dir: PathBuf,
    /// Maximum number of items to generate; 0 means all rows.
    pub limit: usize,
}

/// What a finished run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Number of `(png, json)` item indices written.
    pub generated: usize,
    /// Source asset filenames that were absent from the asset directory.
    /// Their metadata files were still written.
    pub missing_assets: Vec<String>,
}

/// Run a full generation pass.
///
/// Preconditions (missing inputs, an empty trait table, a declined reuse
/// confirmation) fail before anything is written. After that point the only
/// non-fatal condition is a missing individual asset file; any other
/// filesystem error stops the run where it stands.
pub fn generate<R: Rng>(
    config: &GenerateConfig,
    rng: &mut R,
    confirm: &mut dyn Confirm,
) -> Result<GenerateSummary> {
    let table = TraitTable::load(&config.metadata_csv)?;
    let template = MetadataTemplate::load(&config.metadata_template)?;

    if !config.asset_dir.is_dir() {
        return Err(GenerateError::AssetDirMissing {
            path: config.asset_dir.clone(),
        });
    }

    if config.target_dir.exists() {
        let question = format!(
            "The directory '{}' already exists. Are you sure to generate in it?",
            config.target_dir.display()
        );
        let reuse = confirm
            .confirm(&question, Some(false))
            .map_err(|e| GenerateError::Prompt { source: e })?;
        if !reuse {
            return Err(GenerateError::Aborted);
        }
    } else {
        fs::create_dir_all(&config.target_dir).map_err(|e| GenerateError::Io {
            path: config.target_dir.clone(),
            source: e,
        })?;
    }

    let mut remaining = table.rows.clone();
    let total = remaining.len();
    let limit = if config.limit > 0 {
        config.limit.min(total)
    } else {
        total
    };

    let mut summary = GenerateSummary::default();

    for index in 0..limit {
        // Uniform draw over the remaining rows; swap_remove keeps the pool
        // shrink O(1) without biasing the draw.
        let selected = rng.random_range(0..remaining.len());
        let row = remaining.swap_remove(selected);

        let image = format!("{index}.png");
        let source = config.asset_dir.join(&row.asset);
        let target = config.target_dir.join(&image);

        if source.is_file() {
            fs::copy(&source, &target).map_err(|e| GenerateError::Io {
                path: target,
                source: e,
            })?;
        } else {
            warn!("cannot find asset file {}", row.asset);
            summary.missing_assets.push(row.asset.clone());
        }

        let attributes = table.attributes(&row);
        let metadata = template.render(index, &image, &attributes)?;
        write_pretty_json(&config.target_dir.join(format!("{index}.json")), &metadata)?;

        debug!(index, asset = %row.asset, "generated item");
        summary.generated += 1;
    }

    Ok(summary)
}

/// Write `value` as UTF-8 JSON with 4-space indentation, overwriting any
/// existing file.
fn write_pretty_json(path: &Path, value: &Value) -> Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| GenerateError::JsonSerialize { source: e })?;

    fs::write(path, buf).map_err(|e| GenerateError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use crate::confirm::AssumeYes;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;
    use std::collections::BTreeSet;
    use std::io;
    use tempfile::TempDir;

    /// Declines every question, recording what was asked.
    #[derive(Default)]
    struct DeclineAll {
        questions: Vec<(String, Option<bool>)>,
    }

    impl Confirm for DeclineAll {
        fn confirm(&mut self, question: &str, default: Option<bool>) -> io::Result<bool> {
            self.questions.push((question.to_string(), default));
            Ok(false)
        }
    }

    struct Fixture {
        dir: TempDir,
        config: GenerateConfig,
    }

    /// Lay out a csv, template, and asset directory. Each asset file's
    /// contents are its own filename, so copied outputs identify their
    /// source row.
    fn fixture(csv: &str, assets: &[&str]) -> Fixture {
        let dir = TempDir::new().expect("temp dir");
        let root = dir.path();

        fs::write(root.join("metadata.csv"), csv).expect("write csv");
        fs::write(
            root.join("metadata-template.json"),
            serde_json::to_string_pretty(&json!({
                "name": "Ape",
                "symbol": "APE",
                "properties": {"files": [{"uri": "", "type": "image/png"}]}
            }))
            .expect("template json"),
        )
        .expect("write template");

        let asset_dir = root.join("assets");
        fs::create_dir(&asset_dir).expect("create asset dir");
        for asset in assets {
            fs::write(asset_dir.join(asset), asset).expect("write asset");
        }

        let config = GenerateConfig {
            metadata_csv: root.join("metadata.csv"),
            metadata_template: root.join("metadata-template.json"),
            asset_dir,
            target_dir: root.join("target"),
            limit: 0,
        };

        Fixture { dir, config }
    }

    const TWO_ROW_CSV: &str = "File Name,Background,Eyes\na.png,Blue,Round\nb.png,Red,Square\n";

    #[test]
    fn full_run_produces_one_pair_per_row() {
        let fx = fixture(TWO_ROW_CSV, &["a.png", "b.png"]);
        let mut rng = StdRng::seed_from_u64(7);

        let summary = generate(&fx.config, &mut rng, &mut AssumeYes).expect("generate");

        assert_eq!(summary.generated, 2);
        assert!(summary.missing_assets.is_empty());
        for index in 0..2 {
            assert!(fx.config.target_dir.join(format!("{index}.png")).is_file());
            assert!(fx.config.target_dir.join(format!("{index}.json")).is_file());
        }
        assert!(!fx.config.target_dir.join("2.png").exists());
        assert!(!fx.config.target_dir.join("2.json").exists());
    }

    #[test]
    fn each_source_row_is_consumed_exactly_once() {
        let csv = "File Name,Background\na.png,Blue\nb.png,Red\nc.png,Green\nd.png,Gold\n";
        let fx = fixture(csv, &["a.png", "b.png", "c.png", "d.png"]);
        let mut rng = StdRng::seed_from_u64(42);

        generate(&fx.config, &mut rng, &mut AssumeYes).expect("generate");

        // Asset contents are their source filename, so the copied bytes
        // recover which row each index drew.
        let copied: BTreeSet<String> = (0..4)
            .map(|i| {
                fs::read_to_string(fx.config.target_dir.join(format!("{i}.png")))
                    .expect("read copied asset")
            })
            .collect();
        let expected: BTreeSet<String> = ["a.png", "b.png", "c.png", "d.png"]
            .into_iter()
            .map(str::to_string)
            .collect();
        assert_eq!(copied, expected);
    }

    #[test]
    fn metadata_matches_the_sampled_row() {
        let fx = fixture(TWO_ROW_CSV, &["a.png", "b.png"]);
        let mut rng = StdRng::seed_from_u64(3);

        generate(&fx.config, &mut rng, &mut AssumeYes).expect("generate");

        for index in 0..2 {
            let copied =
                fs::read_to_string(fx.config.target_dir.join(format!("{index}.png")))
                    .expect("read copied asset");
            let metadata: Value = serde_json::from_str(
                &fs::read_to_string(fx.config.target_dir.join(format!("{index}.json")))
                    .expect("read metadata"),
            )
            .expect("parse metadata");

            let expected_attributes = if copied == "a.png" {
                json!([
                    {"trait_type": "Background", "value": "Blue"},
                    {"trait_type": "Eyes", "value": "Round"}
                ])
            } else {
                json!([
                    {"trait_type": "Background", "value": "Red"},
                    {"trait_type": "Eyes", "value": "Square"}
                ])
            };

            assert_eq!(metadata["name"], json!(format!("Ape #{}", index + 1)));
            assert_eq!(metadata["image"], json!(format!("{index}.png")));
            assert_eq!(
                metadata["properties"]["files"][0]["uri"],
                json!(format!("{index}.png"))
            );
            assert_eq!(metadata["attributes"], expected_attributes);
            assert_eq!(metadata["symbol"], json!("APE"));
        }
    }

    #[test]
    fn output_json_is_four_space_indented() {
        let fx = fixture(TWO_ROW_CSV, &["a.png", "b.png"]);
        let mut rng = StdRng::seed_from_u64(1);

        generate(&fx.config, &mut rng, &mut AssumeYes).expect("generate");

        let text = fs::read_to_string(fx.config.target_dir.join("0.json")).expect("read");
        assert!(text.contains("\n    \"name\""), "got: {text}");
    }

    #[test]
    fn limit_caps_the_run() {
        let mut fx = fixture(TWO_ROW_CSV, &["a.png", "b.png"]);
        fx.config.limit = 1;
        let mut rng = StdRng::seed_from_u64(11);

        let summary = generate(&fx.config, &mut rng, &mut AssumeYes).expect("generate");

        assert_eq!(summary.generated, 1);
        assert!(fx.config.target_dir.join("0.png").is_file());
        assert!(fx.config.target_dir.join("0.json").is_file());
        assert!(!fx.config.target_dir.join("1.json").exists());
    }

    #[test]
    fn limit_above_row_count_is_clamped() {
        let mut fx = fixture(TWO_ROW_CSV, &["a.png", "b.png"]);
        fx.config.limit = 10;
        let mut rng = StdRng::seed_from_u64(11);

        let summary = generate(&fx.config, &mut rng, &mut AssumeYes).expect("generate");

        assert_eq!(summary.generated, 2);
    }

    #[test]
    fn missing_asset_is_non_fatal_and_still_writes_metadata() {
        // b.png is referenced by the csv but never created.
        let fx = fixture(TWO_ROW_CSV, &["a.png"]);
        let mut rng = StdRng::seed_from_u64(5);

        let summary = generate(&fx.config, &mut rng, &mut AssumeYes).expect("generate");

        assert_eq!(summary.generated, 2);
        assert_eq!(summary.missing_assets, vec!["b.png".to_string()]);
        // Both metadata files exist; only one asset copy does.
        assert!(fx.config.target_dir.join("0.json").is_file());
        assert!(fx.config.target_dir.join("1.json").is_file());
        let copies = (0..2)
            .filter(|i| fx.config.target_dir.join(format!("{i}.png")).is_file())
            .count();
        assert_eq!(copies, 1);
    }

    #[test]
    fn missing_asset_dir_is_fatal() {
        let mut fx = fixture(TWO_ROW_CSV, &["a.png"]);
        fx.config.asset_dir = fx.dir.path().join("nope");
        let mut rng = StdRng::seed_from_u64(5);

        let err = generate(&fx.config, &mut rng, &mut AssumeYes).unwrap_err();
        assert!(matches!(err, GenerateError::AssetDirMissing { .. }));
    }

    #[test]
    fn declining_reuse_leaves_existing_target_untouched() {
        let fx = fixture(TWO_ROW_CSV, &["a.png", "b.png"]);
        fs::create_dir(&fx.config.target_dir).expect("pre-create target");
        fs::write(fx.config.target_dir.join("keep.txt"), "keep").expect("seed file");
        let mut rng = StdRng::seed_from_u64(9);
        let mut confirm = DeclineAll::default();

        let err = generate(&fx.config, &mut rng, &mut confirm).unwrap_err();

        assert!(matches!(err, GenerateError::Aborted));
        let entries: Vec<_> = fs::read_dir(&fx.config.target_dir)
            .expect("read target")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("keep.txt")]);

        // The question defaults to no and names the directory.
        assert_eq!(confirm.questions.len(), 1);
        let (question, default) = &confirm.questions[0];
        assert_eq!(*default, Some(false));
        assert!(question.contains("already exists"));
    }

    #[test]
    fn accepting_reuse_generates_into_existing_target() {
        let fx = fixture(TWO_ROW_CSV, &["a.png", "b.png"]);
        fs::create_dir(&fx.config.target_dir).expect("pre-create target");
        let mut rng = StdRng::seed_from_u64(13);

        let summary = generate(&fx.config, &mut rng, &mut AssumeYes).expect("generate");

        assert_eq!(summary.generated, 2);
    }

    #[test]
    fn fresh_target_directory_needs_no_confirmation() {
        let fx = fixture(TWO_ROW_CSV, &["a.png", "b.png"]);
        let mut rng = StdRng::seed_from_u64(13);
        let mut confirm = DeclineAll::default();

        // DeclineAll would abort if asked; a fresh target never asks.
        let summary = generate(&fx.config, &mut rng, &mut confirm).expect("generate");

        assert_eq!(summary.generated, 2);
        assert!(confirm.questions.is_empty());
    }
}
