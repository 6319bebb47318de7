use std::path::{Path, PathBuf};
use std::process::Command;

use crate::download::segment::segment_filename;
use crate::error::muxer_error::MuxerError;

const FFMPEG: &str = "ffmpeg";
const NAME_PROBE_LIMIT: usize = 10;

// when the preferred name is already taken, numeric suffixes are probed so an
// earlier run's output is not overwritten
pub fn output_filename(folder: &Path, vod_id: &str, group_number: usize) -> PathBuf {
    let mut output = folder.join(format!("{}_c{:02}.mp4", vod_id, group_number));

    if output.exists() {
        for i in 0..NAME_PROBE_LIMIT {
            output = folder.join(format!("{}_c{:02}_{:02}.mp4", vod_id, group_number, i));
            if !output.exists() {
                break;
            }
        }
    }

    output
}

// combines one group of downloaded segments into a single output file and
// deletes the segments afterwards, in playback order
pub fn combine_group(
    count: usize,
    start_index: usize,
    vod_id: &str,
    folder: &Path,
    group_number: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = (start_index..start_index + count)
        .map(|index| folder.join(segment_filename(vod_id, index)))
        .collect::<Vec<_>>();

    let output = output_filename(folder, vod_id, group_number);

    combine(FFMPEG, &inputs, &output)
}

fn combine(muxer: &str, inputs: &[PathBuf], output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // ffmpeg reads the segments through its concat pseudo protocol, so the
    // whole ordered list goes into a single -i argument
    let concat = "concat:".to_string()
        + &inputs
            .iter()
            .map(|input| input.to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("|");
    let output_name = output.to_string_lossy().to_string();

    let result = Command::new(muxer)
        .args(&[
            "-i",
            concat.as_str(),
            "-c",
            "copy",
            "-bsf:a",
            "aac_adtstoasc",
            "-fflags",
            "+genpts",
            output_name.as_str(),
        ])
        .output();

    let result = match result {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Error running {}: {}", muxer, err);
            return Err(Box::new(MuxerError { log: err.to_string() }));
        }
    };

    if !result.status.success() {
        let log = String::from_utf8_lossy(&result.stderr).to_string();
        eprintln!("{}", log);
        eprintln!("{} error", muxer);
        return Err(Box::new(MuxerError { log }));
    }

    for input in inputs {
        if let Err(err) = std::fs::remove_file(input) {
            eprintln!("Error removing file ({}): {}", input.to_string_lossy(), err);
            return Err(Box::new(err));
        }
    }

    Ok(())
}
