//! File-to-file conversion: raw little-endian PCM in, interleaved stereo
//! little-endian PCM out.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
};

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::{debug, info};

use crate::{
    audio::{AudioStream, RateConverter, ReaderSource, Sample},
    common::JobError,
    configs::{ConverterSettings, JobConfig},
};

/// Outcome of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub strategy: &'static str,
    pub frames_in: u64,
    pub frames_out: u64,
    /// Frames emitted by the final drain.
    pub drained: u64,
}

/// Run the `[job]` table against files on disk.
pub fn run(job: &JobConfig, settings: &ConverterSettings) -> Result<JobReport, JobError> {
    let input = File::open(&job.input).map_err(|source| JobError::Open {
        path: job.input.clone(),
        source,
    })?;
    let output = File::create(&job.output).map_err(|source| JobError::Create {
        path: job.output.clone(),
        source,
    })?;

    info!(
        "Converting {} ({} Hz) -> {} ({} Hz)",
        job.input, job.input_rate, job.output, job.output_rate
    );

    let mut writer = BufWriter::new(output);
    let report = convert(BufReader::new(input), &mut writer, job, settings)?;
    writer.flush()?;
    Ok(report)
}

/// Stream `reader` through a converter into `writer`.
pub fn convert<R: Read, W: Write>(
    reader: R,
    mut writer: W,
    job: &JobConfig,
    settings: &ConverterSettings,
) -> Result<JobReport, JobError> {
    let config = settings.to_converter_config(job.stereo);
    let mut conv = RateConverter::with_config(job.input_rate, job.output_rate, &config)?;
    let mut source = ReaderSource::new(reader, job.stereo);

    let chunk = job.chunk_frames.max(1);
    let mut out: Vec<Sample> = vec![config.sample_format.silence(); chunk * 2];
    let mut frames_out = 0u64;

    loop {
        let n = conv.flow(&mut source, &mut out, chunk, job.volume_left, job.volume_right);
        write_frames(&mut writer, &out[..n * 2])?;
        frames_out += n as u64;
        if n < chunk && source.end_of_data() {
            break;
        }
        out.fill(config.sample_format.silence());
    }

    conv.finish();
    let mut drained = 0u64;
    loop {
        out.fill(config.sample_format.silence());
        // drain takes one volume for both channels; only the held tail
        // frames pass through here.
        let n = conv.drain(&mut out, chunk, job.volume_left);
        if n == 0 {
            break;
        }
        write_frames(&mut writer, &out[..n * 2])?;
        drained += n as u64;
    }
    frames_out += drained;

    let channels = if job.stereo { 2 } else { 1 };
    let report = JobReport {
        strategy: conv.strategy_name(),
        frames_in: source.samples_read() / channels,
        frames_out,
        drained,
    };
    debug!("{:?}", report);
    info!(
        "Converted {} frames into {} frames using {}",
        report.frames_in, report.frames_out, report.strategy
    );
    Ok(report)
}

fn write_frames<W: Write>(writer: &mut W, samples: &[Sample]) -> Result<(), JobError> {
    for &s in samples {
        writer.write_i16::<LittleEndian>(s)?;
    }
    Ok(())
}
