//! The hardware RNG test suite behind `truernd selftest`.

use std::collections::HashMap;
use std::io::Write;
use std::time::{Duration, Instant};

use tracing::{info, warn};
use truernd::{ffi, HwRng, Source};
use truernd_types::Arch;

use crate::config::SelfTestConfig;
use crate::error::CliError;

/// Outcome of one check.
#[derive(Debug, Clone)]
pub struct Check {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub arch: Arch,
    pub supported: bool,
    pub max_attempts: u32,
    pub checks: Vec<Check>,
}

impl Report {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.supported && self.checks.iter().all(|c| c.passed)
    }

    pub fn render<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Architecture: {}", self.arch)?;
        writeln!(out, "Max retries:  {}", self.max_attempts)?;
        writeln!(out)?;
        for (index, check) in self.checks.iter().enumerate() {
            let mark = if check.passed { "PASS" } else { "FAIL" };
            writeln!(out, "[{}] {mark}: {}", index + 1, check.name)?;
            for line in check.detail.lines() {
                writeln!(out, "      {line}")?;
            }
        }
        writeln!(out)?;
        if !self.supported {
            writeln!(out, "Cannot continue testing without hardware support")?;
            return Ok(());
        }
        let total = self.checks.len();
        writeln!(out, "Passed: {}/{total}", self.passed())?;
        writeln!(
            out,
            "{}",
            if self.all_passed() {
                "ALL TESTS PASSED"
            } else {
                "SOME TESTS FAILED"
            }
        )
    }
}

/// Run the suite against the CPU.
pub fn run(config: &SelfTestConfig) -> Result<Report, CliError> {
    config.validate()?;
    let arch = Arch::current();
    match HwRng::with_policy(config.retry) {
        Ok(mut rng) => Ok(run_with(&mut rng, arch, config)),
        Err(truernd::HwRngError::Unsupported { .. }) => {
            warn!(%arch, "hardware RNG not supported");
            Ok(Report {
                arch,
                supported: false,
                max_attempts: config.retry.max_attempts,
                checks: vec![support_check(arch, false)],
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// Run every check against `rng`, which is assumed to be available.
pub fn run_with<S: Source>(rng: &mut HwRng<S>, arch: Arch, config: &SelfTestConfig) -> Report {
    let checks = vec![
        support_check(arch, true),
        batch32(rng, config.batch_size),
        batch64(rng, config.batch_size),
        buffer_fill(rng, config.buffer_size),
        uniqueness(rng, config.sample_count, config.max_duplicates),
        throughput(rng, config.iterations),
        error_handling(),
    ];
    for check in &checks {
        info!(check = check.name, passed = check.passed, "selftest check finished");
    }
    Report {
        arch,
        supported: true,
        max_attempts: rng.policy().max_attempts,
        checks,
    }
}

fn support_check(arch: Arch, supported: bool) -> Check {
    let detail = match (supported, arch.instruction()) {
        (true, Some(instruction)) => format!("{instruction} available"),
        (true, None) => "available".to_string(),
        (false, Some(instruction)) => format!("this CPU does not implement {instruction}"),
        (false, None) => format!("no hardware random instruction on {arch}"),
    };
    Check {
        name: "Hardware support detection",
        passed: supported,
        detail,
    }
}

fn batch32<S: Source>(rng: &mut HwRng<S>, count: usize) -> Check {
    let mut lines = Vec::with_capacity(count);
    let mut ok = 0;
    for i in 0..count {
        match rng.get32() {
            Ok(v) => {
                ok += 1;
                lines.push(format!("[{i}] 0x{v:08X} ({v})"));
            }
            Err(err) => lines.push(format!("[{i}] FAILED: {err}")),
        }
    }
    lines.push(format!("{ok}/{count} generations successful"));
    Check {
        name: "32-bit random generation",
        passed: ok == count,
        detail: lines.join("\n"),
    }
}

fn batch64<S: Source>(rng: &mut HwRng<S>, count: usize) -> Check {
    let mut lines = Vec::with_capacity(count);
    let mut ok = 0;
    for i in 0..count {
        match rng.get64() {
            Ok(v) => {
                ok += 1;
                lines.push(format!("[{i}] 0x{v:016X} ({v})"));
            }
            Err(err) => lines.push(format!("[{i}] FAILED: {err}")),
        }
    }
    lines.push(format!("{ok}/{count} generations successful"));
    Check {
        name: "64-bit random generation",
        passed: ok == count,
        detail: lines.join("\n"),
    }
}

fn buffer_fill<S: Source>(rng: &mut HwRng<S>, size: usize) -> Check {
    let name = "Buffer fill";
    let mut buffer = vec![0u8; size];
    if let Err(err) = rng.fill(&mut buffer) {
        return Check {
            name,
            passed: false,
            detail: format!("failed to fill {size} byte buffer: {err}"),
        };
    }

    let non_zero = buffer.iter().filter(|&&b| b != 0).count();
    let preview: Vec<String> = buffer
        .iter()
        .take(64)
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .chunks(16)
        .map(|row| row.join(" "))
        .collect();
    let passed = non_zero > size / 2;
    let verdict = if passed {
        "buffer filled with random data"
    } else {
        "buffer appears not random"
    };
    Check {
        name,
        passed,
        detail: format!("{}\n{verdict} ({non_zero}/{size} non-zero bytes)", preview.join("\n")),
    }
}

fn uniqueness<S: Source>(rng: &mut HwRng<S>, count: usize, allowed: usize) -> Check {
    let name = "Uniqueness";
    let mut seen: HashMap<u64, usize> = HashMap::with_capacity(count);
    let mut lines = Vec::new();
    let mut duplicates = 0;
    for i in 0..count {
        let value = match rng.get64() {
            Ok(v) => v,
            Err(err) => {
                return Check {
                    name,
                    passed: false,
                    detail: format!("failed to generate value at index {i}: {err}"),
                };
            }
        };
        if let Some(&first) = seen.get(&value) {
            duplicates += 1;
            lines.push(format!("duplicate: values[{first}] == values[{i}] = 0x{value:016X}"));
        } else {
            seen.insert(value, i);
        }
    }
    lines.push(if duplicates == 0 {
        format!("all {count} values are unique")
    } else {
        format!("found {duplicates} duplicate(s), {allowed} allowed")
    });
    Check {
        name,
        passed: duplicates <= allowed,
        detail: lines.join("\n"),
    }
}

fn throughput<S: Source>(rng: &mut HwRng<S>, iterations: usize) -> Check {
    let name = "Performance";
    let start = Instant::now();
    for i in 0..iterations {
        if let Err(err) = rng.get32() {
            return Check {
                name,
                passed: false,
                detail: format!("32-bit generation failed at iteration {i}: {err}"),
            };
        }
    }
    let elapsed32 = start.elapsed();

    let start = Instant::now();
    for i in 0..iterations {
        if let Err(err) = rng.get64() {
            return Check {
                name,
                passed: false,
                detail: format!("64-bit generation failed at iteration {i}: {err}"),
            };
        }
    }
    let elapsed64 = start.elapsed();

    Check {
        name,
        passed: true,
        detail: format!(
            "32-bit: {}\n64-bit: {}",
            rate(iterations, elapsed32),
            rate(iterations, elapsed64)
        ),
    }
}

fn rate(iterations: usize, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        format!(
            "{iterations} values in {secs:.4}s ({:.0} values/s)",
            iterations as f64 / secs
        )
    } else {
        format!("{iterations} values in under the timer resolution")
    }
}

/// Exercises the C ABI with arguments that must be rejected up front.
fn error_handling() -> Check {
    let mut buf = [0u8; 10];
    // SAFETY: null pointers are part of the contract under test; `buf` is a
    // live local for the zero-length call.
    let cases = unsafe {
        [
            ("truernd_get32(NULL)", ffi::truernd_get32(std::ptr::null_mut())),
            ("truernd_get64(NULL)", ffi::truernd_get64(std::ptr::null_mut())),
            ("truernd_fill(NULL, 100)", ffi::truernd_fill(std::ptr::null_mut(), 100)),
            ("truernd_fill(buf, 0)", ffi::truernd_fill(buf.as_mut_ptr().cast(), 0)),
        ]
    };
    let passed = cases.iter().all(|(_, status)| *status != 0) && buf == [0u8; 10];
    let detail = cases
        .iter()
        .map(|(call, status)| {
            let verdict = if *status != 0 { "rejected" } else { "ACCEPTED" };
            format!("{call}: {verdict}")
        })
        .collect::<Vec<_>>()
        .join("\n");
    Check {
        name: "Error handling",
        passed,
        detail,
    }
}
