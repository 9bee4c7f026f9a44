use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use video_stream::frame::Frame;
use video_stream::platform::opencv::OpencvBackend;
use video_stream::{CaptureStream, StreamConfig, VideoStream};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: scan <video> [start-seconds]");
        return ExitCode::FAILURE;
    };
    let start: Option<f64> = args.next().and_then(|s| s.parse().ok());

    let config = StreamConfig::default();
    let mut stream = match CaptureStream::open(OpencvBackend::default(), path.as_str(), &config) {
        Ok(stream) => stream,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = scan(&mut stream, start) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn scan(
    stream: &mut CaptureStream<OpencvBackend>,
    start: Option<f64>,
) -> Result<(), video_stream::Error> {
    stream.downscale_auto()?;
    println!(
        "{}: {:.3} fps, {:?} (effective {:?}, downscale {}), duration {}",
        stream.path(),
        stream.frame_rate(),
        stream.frame_size()?,
        stream.frame_size_effective()?,
        stream.downscale(),
        stream
            .duration()?
            .map_or_else(|| "unbounded".to_owned(), |d| d.to_string()),
    );

    if let Some(secs) = start {
        stream.seek(secs.into())?;
    }

    // Decode one frame per second of video and only grab the ones in between.
    let step = stream.frame_rate().round().max(1.0) as u64;
    while let Some(frame) = stream.next_frame()? {
        let size = frame.size();
        println!(
            "frame {:>6}  {}  {:>10.1} ms  {}x{}",
            stream.frame_number()?,
            stream.position()?,
            stream.position_ms()?,
            size.width,
            size.height,
        );
        for _ in 1..step {
            stream.read(false, true)?;
        }
    }
    println!("read {} frames", stream.frame_number()?);
    Ok(())
}
