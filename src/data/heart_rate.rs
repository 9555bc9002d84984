use std::f64::consts::PI;

use num_complex::Complex;

/// Longest trailing window analysed, in samples.
pub const SEGMENT_SAMPLES: usize = 1024;
/// Lower edge of the physiological band (30 BPM).
pub const MIN_FREQ_HZ: f64 = 0.5;
/// Upper edge of the physiological band (180 BPM).
pub const MAX_FREQ_HZ: f64 = 3.0;

/// Dominant pulse frequency of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartRate {
    pub hz: f64,
    pub bpm: f64,
}

/// Estimate the heart rate of a PPG series from its dominant spectral peak.
///
/// The last [`SEGMENT_SAMPLES`] samples are mean-removed, Hann-windowed and
/// zero-padded to a power of two before the FFT. Only bins between
/// [`MIN_FREQ_HZ`] and [`MAX_FREQ_HZ`] are searched; DC is never a candidate.
pub fn estimate_heart_rate(samples: &[f64], sample_rate_hz: f64) -> Option<HeartRate> {
    if samples.len() < 2 || !(sample_rate_hz > 0.0) {
        return None;
    }

    let segment = &samples[samples.len().saturating_sub(SEGMENT_SAMPLES)..];
    let n = segment.len();
    let mean = segment.iter().sum::<f64>() / n as f64;

    let fft_len = n.next_power_of_two();
    let mut buf: Vec<Complex<f64>> = segment
        .iter()
        .enumerate()
        .map(|(i, &s)| Complex::new((s - mean) * hann(i, n), 0.0))
        .collect();
    buf.resize(fft_len, Complex::new(0.0, 0.0));

    fft_in_place(&mut buf);

    let bin_hz = sample_rate_hz / fft_len as f64;
    let min_bin = ((MIN_FREQ_HZ / bin_hz).ceil() as usize).max(1);
    let max_bin = ((MAX_FREQ_HZ / bin_hz).floor() as usize).min(fft_len / 2);
    if min_bin > max_bin {
        log::debug!("Band {MIN_FREQ_HZ}–{MAX_FREQ_HZ} Hz has no bins at {bin_hz:.4} Hz/bin");
        return None;
    }

    let (peak_bin, peak_power) = (min_bin..=max_bin)
        .map(|k| (k, buf[k].norm_sqr()))
        .fold((0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });

    if peak_bin == 0 || peak_power <= 0.0 {
        return None;
    }

    let hz = peak_bin as f64 * bin_hz;
    Some(HeartRate { hz, bpm: hz * 60.0 })
}

fn hann(i: usize, n: usize) -> f64 {
    if n < 2 {
        return 1.0;
    }
    0.5 * (1.0 - (2.0 * PI * i as f64 / (n - 1) as f64).cos())
}

/// Iterative radix-2 Cooley–Tukey FFT. `buf.len()` must be a power of two.
fn fft_in_place(buf: &mut [Complex<f64>]) {
    let n = buf.len();
    debug_assert!(n.is_power_of_two());
    if n < 2 {
        return;
    }

    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if i < j {
            buf.swap(i, j);
        }
    }

    let mut m = 2;
    while m <= n {
        let half = m / 2;
        let step = Complex::from_polar(1.0, -2.0 * PI / m as f64);
        for start in (0..n).step_by(m) {
            let mut w = Complex::new(1.0, 0.0);
            for j in 0..half {
                let u = buf[start + j];
                let t = w * buf[start + j + half];
                buf[start + j] = u + t;
                buf[start + j + half] = u - t;
                w *= step;
            }
        }
        m *= 2;
    }
}
