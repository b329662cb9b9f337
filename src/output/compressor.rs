//! External DDS compressor invocation.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use super::OutputError;

/// Arguments for a DXT5 texture without mipmaps at the highest quality.
pub fn compressor_args(png: &Path, dds: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(9);
    args.push("-file".into());
    args.push(png.as_os_str().to_owned());
    args.push("-output".into());
    args.push(dds.as_os_str().to_owned());
    for flag in ["-quality_highest", "-dxt5", "-nomipmap", "-overwrite", "-forcewrite"] {
        args.push(flag.into());
    }
    args
}

/// Run `program` to turn `png` into `dds` and wait for it.
pub fn compress(program: &str, png: &Path, dds: &Path) -> Result<(), OutputError> {
    log::info!("Running {} on {:?}", program, png);

    // A leftover from an earlier run must not pass for fresh output
    if dds.exists() {
        std::fs::remove_file(dds).map_err(|source| OutputError::Io {
            path: dds.to_path_buf(),
            source,
        })?;
    }

    let output = Command::new(program)
        .args(compressor_args(png, dds))
        .stdin(Stdio::null())
        .output()
        .map_err(|source| OutputError::CompressorSpawn {
            program: program.to_string(),
            source,
        })?;

    if !output.stdout.is_empty() {
        log::debug!(
            "{} stdout: {}",
            program,
            String::from_utf8_lossy(&output.stdout).trim_end()
        );
    }
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::error!("{} failed: {}", program, stderr.trim_end());
        return Err(OutputError::CompressorFailed {
            program: program.to_string(),
            status: output.status,
        });
    }
    if !dds.exists() {
        return Err(OutputError::CompressorNoOutput {
            path: dds.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_order() {
        let args = compressor_args(Path::new("in.png"), Path::new("out.dds"));
        let args: Vec<_> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            [
                "-file",
                "in.png",
                "-output",
                "out.dds",
                "-quality_highest",
                "-dxt5",
                "-nomipmap",
                "-overwrite",
                "-forcewrite"
            ]
        );
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = compress(
            "lyric-atlas-no-such-compressor",
            Path::new("in.png"),
            Path::new("out.dds"),
        )
        .unwrap_err();
        assert!(matches!(err, OutputError::CompressorSpawn { .. }));
    }
}
