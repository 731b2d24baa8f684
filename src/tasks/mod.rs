use crate::commands::cue::{DumpCommand, InfoCommand, ResolveCommand};
use anyhow::{Context, bail};
use cuesheet::Cue;
use cuesheet::cd::Msf;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info};
use serde::Serialize;
use std::path::PathBuf;
use tokio::{fs, task};

#[derive(Serialize)]
struct CueReport<'a> {
    #[serde(flatten)]
    cue: &'a Cue,
    track_lengths: Vec<Option<u64>>,
}

/// Parses every cue sheet on its own blocking task, keeping input order.
async fn parse_all(pb: &MultiProgress, paths: &[PathBuf]) -> anyhow::Result<Vec<Cue>> {
    let bar = pb.add(ProgressBar::new(paths.len() as u64));
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    bar.set_message("Parsing cue sheets");

    let handles: Vec<_> = paths
        .iter()
        .cloned()
        .map(|path| {
            task::spawn_blocking(move || {
                let mut cue = Cue::new(&path);
                cue.parse().map(|_| cue)
            })
        })
        .collect();

    let mut cues = Vec::with_capacity(handles.len());
    for (path, handle) in paths.iter().zip(handles) {
        let cue = handle
            .await?
            .with_context(|| format!("Failed to parse {path:?}"))?;
        bar.inc(1);
        cues.push(cue);
    }

    bar.finish_and_clear();
    pb.remove(&bar);

    Ok(cues)
}

pub async fn dump_cues(pb: MultiProgress, cmd: DumpCommand) -> anyhow::Result<()> {
    let cues = parse_all(&pb, &cmd.input).await?;

    let Some(output_dir) = &cmd.output else {
        for cue in &cues {
            print!("{}", cue.dump());
        }
        return Ok(());
    };

    fs::create_dir_all(output_dir).await?;

    for cue in &cues {
        let name = cue
            .path()
            .file_name()
            .with_context(|| format!("{:?} has no file name", cue.path()))?;
        let target = output_dir.join(name);

        if fs::try_exists(&target).await? && !cmd.force {
            bail!("{target:?} already exists, use --force to overwrite");
        }

        fs::write(&target, cue.dump()).await?;
        info!("Wrote {target:?}");
    }

    Ok(())
}

pub async fn show_info(pb: MultiProgress, cmd: InfoCommand) -> anyhow::Result<()> {
    let cues = parse_all(&pb, &cmd.input).await?;

    if cmd.json {
        let reports: Vec<CueReport> = cues
            .iter()
            .map(|cue| CueReport {
                cue,
                track_lengths: cue
                    .tracks()
                    .iter()
                    .map(|track| cue.track_length(track))
                    .collect(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for cue in &cues {
        println!("{}", cue.path().display());

        for (tag, value) in cue.remarks() {
            println!("  REM {tag}: {value}");
        }

        for track in cue.tracks() {
            let length = match cue.track_length(track) {
                Some(frames) => format!("{} ({frames} frames)", Msf::from_frames(frames)),
                None => "unknown".to_string(),
            };
            println!(
                "  Track {:02} ({}), length {length}",
                track.number(),
                track.mode().unwrap_or("AUDIO")
            );

            for (number, index) in track.indexes() {
                println!(
                    "    INDEX {number:02} {}  {}",
                    index.timecode(),
                    index.file.path
                );
            }
        }

        for diagnostic in cue.diagnostics() {
            println!("  {diagnostic}");
        }
    }

    Ok(())
}

pub async fn resolve_files(pb: MultiProgress, cmd: ResolveCommand) -> anyhow::Result<()> {
    let cues = parse_all(&pb, &cmd.input).await?;
    let mut unresolved = 0;

    for cue in &cues {
        debug!("Resolving {} files of {:?}", cue.files().len(), cue.path());

        for file in cue.files() {
            match cue.get_real_path(&file.path) {
                Ok(path) => println!("{} -> {}", file.path, path.display()),
                Err(e) => {
                    error!("{:?}: {e}", cue.path());
                    unresolved += 1;
                }
            }
        }
    }

    if unresolved > 0 {
        bail!("{unresolved} referenced files could not be resolved");
    }

    Ok(())
}
