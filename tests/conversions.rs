#![warn(unused)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unsafe_code)]
#![deny(unstable_features)]
#![deny(unused_import_braces)]
#![deny(
    clippy::complexity,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]
#![allow(clippy::too_many_lines)] // This requires effort to handle

use nv12topnm::{
    convert, convert_into, resolve_config, write_ppm, ChannelMode, Config, ConfigArgs,
};

use itertools::iproduct;
use rand::Rng;

const MODES: &[ChannelMode; 3] = &[
    ChannelMode::Full,
    ChannelMode::LuminanceOnly,
    ChannelMode::ChrominanceOnly,
];

/// Straight rendition of the per pixel formula, one pixel at a time
fn reference(frame: &[u8], config: &Config) -> Vec<u8> {
    let width = i64::from(config.width);
    let height = i64::from(config.height);
    let stride = i64::try_from(config.bytes_per_line).unwrap();
    let luma_size = stride * height;
    let sample = |index: i64| i64::from(frame[usize::try_from(index).unwrap()]);

    let mut rgb = Vec::new();
    for (row, column) in iproduct!(0..height, 0..width) {
        let y = if config.mode == ChannelMode::ChrominanceOnly {
            128
        } else {
            sample(row * stride + column)
        };

        let (mut cb, mut cr) = (0, 0);
        if config.mode != ChannelMode::LuminanceOnly {
            let base = luma_size + (row / 2) * stride;
            cb = sample(base + (column & !1)) - 128;
            cr = sample(base + (column | 1)) - 128;
            if config.swap_chrominance {
                std::mem::swap(&mut cb, &mut cr);
            }
        }

        // i64 division truncates toward zero, as required
        let r = y + 91881 * cr / 65536;
        let g = y - (22572 * cb + 46802 * cr) / 65536;
        let b = y + 116130 * cb / 65536;

        for value in [r, g, b] {
            rgb.push(u8::try_from(value.clamp(0, 255)).unwrap());
        }
    }

    rgb
}

fn random_frame(config: &Config) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..config.frame_size().unwrap()).map(|_| rng.gen()).collect()
}

fn config(width: u32, height: u32, stride: usize, mode: ChannelMode, swap: bool) -> Config {
    Config {
        width,
        height,
        bytes_per_line: stride,
        mode,
        swap_chrominance: swap,
    }
}

#[test]
fn gray_scenario() {
    let frame = [16, 235, 16, 235, 128, 128];
    let config = Config::new(2, 2);

    let pixels = convert(&frame, &config).unwrap();
    assert_eq!(
        pixels,
        [16, 16, 16, 235, 235, 235, 16, 16, 16, 235, 235, 235]
    );

    let mut ppm = Vec::new();
    write_ppm(&mut ppm, config.width, config.height, &pixels).unwrap();
    assert_eq!(&ppm[..11], b"P6\n2 2\n255\n");
    assert_eq!(&ppm[11..], &pixels[..]);
}

#[test]
fn matches_reference() {
    const PAD: &[usize] = &[0, 1, 2, 15];
    const WIDTHS: &[u32] = &[2, 4, 6, 32, 34];
    const HEIGHTS: &[u32] = &[2, 4, 8, 10];

    for (&width, &height, &pad, &mode, swap) in
        iproduct!(WIDTHS, HEIGHTS, PAD, MODES, [false, true])
    {
        let config = config(width, height, width as usize + pad, mode, swap);
        let frame = random_frame(&config);

        let pixels = convert(&frame, &config).unwrap();
        assert_eq!(
            pixels,
            reference(&frame, &config),
            "{width}x{height}, stride {}, {mode}, swap {swap}",
            config.bytes_per_line
        );
    }
}

#[test]
fn ppm_size() {
    for (&width, &height, &pad) in iproduct!(&[2_u32, 6, 98], &[2_u32, 4, 66], &[0_usize, 3]) {
        let config = config(width, height, width as usize + pad, ChannelMode::Full, false);
        let frame = random_frame(&config);
        let pixels = convert(&frame, &config).unwrap();

        let mut ppm = Vec::new();
        write_ppm(&mut ppm, width, height, &pixels).unwrap();

        let header = format!("P6\n{width} {height}\n255\n");
        assert!(ppm.starts_with(header.as_bytes()));
        assert_eq!(
            ppm.len() - header.len(),
            (width as usize) * (height as usize) * 3
        );
    }
}

#[test]
fn luminance_only_is_gray() {
    let config = config(16, 8, 20, ChannelMode::LuminanceOnly, false);
    let frame = random_frame(&config);
    let pixels = convert(&frame, &config).unwrap();

    for (row, column) in iproduct!(0..8_usize, 0..16_usize) {
        let y = frame[row * 20 + column];
        let offset = 3 * (row * 16 + column);
        assert_eq!(&pixels[offset..offset + 3], &[y, y, y]);
    }

    // Swapping has nothing to act on
    let swapped = Config {
        swap_chrominance: true,
        ..config
    };
    assert_eq!(convert(&frame, &swapped).unwrap(), pixels);
}

#[test]
fn chrominance_only_ignores_luma() {
    let config = config(16, 8, 16, ChannelMode::ChrominanceOnly, false);
    let mut frame = random_frame(&config);
    let pixels = convert(&frame, &config).unwrap();

    // Same chroma with a different luma plane gives the same output
    for byte in &mut frame[..16 * 8] {
        *byte = byte.wrapping_add(77);
    }
    assert_eq!(convert(&frame, &config).unwrap(), pixels);

    // Neutral chroma gives the neutral gray
    let neutral = [0_u8; 4 * 2].into_iter().chain([128_u8; 4]).collect::<Vec<_>>();
    let gray = convert(&neutral, &Config::new(4, 2)).unwrap();
    assert!(gray.iter().all(|&v| v == 0));
    let gray = convert(
        &neutral,
        &config_with_mode(Config::new(4, 2), ChannelMode::ChrominanceOnly),
    )
    .unwrap();
    assert!(gray.iter().all(|&v| v == 128));
}

fn config_with_mode(config: Config, mode: ChannelMode) -> Config {
    Config { mode, ..config }
}

#[test]
fn swap_exchanges_chroma() {
    // One 2x2 block: cb = 200, cr = 60 in the stored order
    let frame = [90, 90, 90, 90, 200, 60];
    let swapped_frame = [90, 90, 90, 90, 60, 200];

    for &mode in &[ChannelMode::Full, ChannelMode::ChrominanceOnly] {
        let plain = config_with_mode(Config::new(2, 2), mode);
        let swapped = Config {
            swap_chrominance: true,
            ..plain
        };

        assert_eq!(
            convert(&frame, &swapped).unwrap(),
            convert(&swapped_frame, &plain).unwrap()
        );
        assert_ne!(
            convert(&frame, &swapped).unwrap(),
            convert(&frame, &plain).unwrap()
        );
    }
}

#[test]
fn extremes_saturate() {
    let cases: &[([u8; 6], [u8; 3])] = &[
        ([0, 0, 0, 0, 255, 255], [178, 0, 225]),
        ([255, 255, 255, 255, 255, 255], [255, 121, 255]),
        ([0, 0, 0, 0, 0, 0], [0, 135, 0]),
        ([255, 255, 255, 255, 0, 0], [76, 255, 29]),
    ];

    for (frame, rgb) in cases {
        let pixels = convert(frame, &Config::new(2, 2)).unwrap();
        for pixel in pixels.chunks_exact(3) {
            assert_eq!(pixel, rgb);
        }
    }
}

#[test]
fn default_stride_is_width() {
    let explicit = resolve_config(&ConfigArgs {
        width: Some(34),
        height: Some(6),
        bytes_per_line: Some(34),
        ..ConfigArgs::default()
    })
    .unwrap();
    let omitted = resolve_config(&ConfigArgs {
        width: Some(34),
        height: Some(6),
        ..ConfigArgs::default()
    })
    .unwrap();

    let frame = random_frame(&explicit);
    assert_eq!(
        convert(&frame, &explicit).unwrap(),
        convert(&frame, &omitted).unwrap()
    );
}

#[test]
fn padding_is_ignored() {
    let config = config(6, 4, 8, ChannelMode::Full, false);
    let mut frame = random_frame(&config);
    let pixels = convert(&frame, &config).unwrap();

    // Bytes 6 and 7 of every line (both planes) are padding
    for line in frame.chunks_exact_mut(8) {
        line[6] = !line[6];
        line[7] = !line[7];
    }
    assert_eq!(convert(&frame, &config).unwrap(), pixels);
}

#[test]
fn longer_frame_is_accepted() {
    let config = Config::new(4, 4);
    let mut frame = random_frame(&config);
    let pixels = convert(&frame, &config).unwrap();

    frame.extend_from_slice(&[1, 2, 3]);
    assert_eq!(convert(&frame, &config).unwrap(), pixels);
}

#[test]
fn convert_into_keeps_tail() {
    let config = Config::new(2, 2);
    let frame = [16, 235, 16, 235, 128, 128];
    let mut dst = [0xA5_u8; 15];

    convert_into(&frame, &config, &mut dst).unwrap();
    assert_eq!(&dst[..12], &convert(&frame, &config).unwrap()[..]);
    assert_eq!(&dst[12..], &[0xA5; 3]);
}

#[test]
fn parallel_matches_sequential() {
    let config = config(66, 130, 80, ChannelMode::Full, true);
    let frame = random_frame(&config);
    let parallel = convert(&frame, &config).unwrap();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();
    let sequential = pool.install(|| convert(&frame, &config).unwrap());

    assert_eq!(parallel, sequential);
}
