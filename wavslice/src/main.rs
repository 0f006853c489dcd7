mod cli;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use wavslice_core::{
    plan_slices, plan_subdivisions, slice_every_n_with, subdivide_by_n_with, FrameSource,
    WavSource,
};

use crate::cli::build_cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = build_cli().get_matches();

    let input_path = matches
        .get_one::<PathBuf>("file_path")
        .expect("required argument");
    if !input_path.is_file() {
        return Err(anyhow!(
            "input file does not exist: {}",
            input_path.display()
        ));
    }

    let count = *matches.get_one::<u64>("count").expect("required argument");
    let prefix = matches
        .get_one::<String>("prefix")
        .expect("required argument")
        .clone();
    let subdivide = matches.get_flag("subdivide");
    let dry_run = matches.get_flag("dry-run");

    let mut source = WavSource::open(input_path)
        .with_context(|| format!("failed to open '{}'", input_path.display()))?;

    if dry_run {
        let plan = if subdivide {
            plan_subdivisions(source.frames(), count, &prefix)
        } else {
            plan_slices(source.frames(), count as usize, &prefix)
        }
        .with_context(|| format!("failed to plan outputs for '{}'", input_path.display()))?;

        if plan.is_empty() {
            println!("Dry run: no files would be generated.");
        } else {
            println!("Dry run: would generate {} file(s):", plan.len());
            for path in plan {
                println!("  {}", path.display());
            }
        }

        return Ok(());
    }

    let expected = if subdivide {
        count
    } else {
        source.frames().div_ceil(count)
    };

    let progress = ProgressBar::new(expected);
    progress.set_draw_target(ProgressDrawTarget::stderr());
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));

    let progress_handle = progress.clone();
    let result = if subdivide {
        subdivide_by_n_with(&mut source, count, &prefix, move |path, _index| {
            progress_handle.set_message(path.display().to_string());
            progress_handle.inc(1);
        })
        .map(|_| ())
    } else {
        slice_every_n_with(&mut source, count as usize, &prefix, move |path, _index| {
            progress_handle.set_message(path.display().to_string());
            progress_handle.inc(1);
        })
        .map(|_| ())
    };

    progress.finish_and_clear();

    result.with_context(|| format!("failed to split '{}'", input_path.display()))?;

    Ok(())
}
