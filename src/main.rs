mod api;
mod combine;
mod download;
mod error;
mod options;
mod pipeline;
mod planner;

use clap::Parser;

use planner::Timestamp;

/// Downloads a time range of a vod and combines its segments into playable
/// mp4 files using ffmpeg.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// the number you see in the url of the vod (https://www.twitch.tv/videos/123456789 => 123456789)
    vod_id: String,

    /// start of the range to download
    start_hour: u32,
    start_minute: u32,
    start_second: u32,

    /// end of the range to download
    end_hour: u32,
    end_minute: u32,
    end_second: u32,

    #[clap(short, long, default_value = "5")]
    /// set the maximum number of parallel segment downloads
    parallel: usize,

    #[clap(short, long, default_value = "100")]
    /// set the number of segments combined into one output file
    group_size: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let start = Timestamp::new(args.start_hour, args.start_minute, args.start_second);
    let end = Timestamp::new(args.end_hour, args.end_minute, args.end_second);

    if start.as_seconds() > end.as_seconds() {
        eprintln!("The start time has to lie before the end time.");
        eprintln!("Downloading the first one and a half hours of a vod would be: vodcat 123456789 0 0 0 1 30 0");
        std::process::exit(1);
    }

    let options = options::Options {
        max_parallel_downloads: args.parallel,
        group_size: args.group_size,
    };

    pipeline::run(&args.vod_id, start, end, &options).await?;

    println!("All done!");

    Ok(())
}
