/*
 * Copyright 2007 ZXing authors
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! `prismcode-cli IMAGE...`: decode every barcode in each image and print
//! its payload, one line per symbol found.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use prismcode::common::HybridBinarizer;
use prismcode::{BinaryBitmap, DecodeHints, Luma8LuminanceSource, MultiFormatReader, Reader};

struct Options {
    hybrid: bool,
    global: bool,
    verbose: bool,
    more: bool,
    test_mode: bool,
    try_harder: bool,
    search_multi: bool,
    images: Vec<PathBuf>,
}

fn parse_args() -> Options {
    let mut opts = Options {
        hybrid: false,
        global: false,
        verbose: false,
        more: false,
        test_mode: false,
        try_harder: false,
        search_multi: false,
        images: Vec::new(),
    };

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--hybrid" => opts.hybrid = true,
            "-g" | "--global" => opts.global = true,
            "-v" | "--verbose" => opts.verbose = true,
            "--more" => opts.more = true,
            "--test-mode" => opts.test_mode = true,
            "--try-harder" => opts.try_harder = true,
            "--search-multi" => opts.search_multi = true,
            other => opts.images.push(PathBuf::from(other)),
        }
    }

    if !opts.global {
        opts.hybrid = true;
    }

    opts
}

fn main() -> ExitCode {
    #[cfg(feature = "cli")]
    env_logger::init();

    let opts = parse_args();
    if opts.images.is_empty() {
        eprintln!("usage: prismcode-cli [OPTION]... <IMAGE>...");
        return ExitCode::FAILURE;
    }

    let hints = DecodeHints {
        try_harder: opts.try_harder,
        ..DecodeHints::default()
    };

    let mut all_ok = true;
    for image_path in &opts.images {
        if !decode_one(image_path, &opts, &hints) {
            all_ok = false;
        }
    }

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn decode_one(path: &Path, opts: &Options, hints: &DecodeHints) -> bool {
    let img = match image::open(path) {
        Ok(img) => img,
        Err(err) => {
            eprintln!("{}: could not open image: {err}", path.display());
            return opts.test_mode;
        }
    };
    let luma = img.to_luma8();
    let (width, height) = (luma.width() as usize, luma.height() as usize);
    let source = Luma8LuminanceSource::new(luma.into_raw(), width, height);

    let results = if opts.global {
        decode_with_binarizer(prismcode::common::GlobalHistogramBinarizer::new(source), hints, opts.search_multi)
    } else {
        decode_with_binarizer(HybridBinarizer::new(source), hints, opts.search_multi)
    };

    match results {
        Ok(results) if !results.is_empty() => {
            for result in &results {
                if opts.verbose {
                    eprintln!("{}: decoded a {:?} symbol", path.display(), result.format());
                }
                if opts.more {
                    println!("Format: {:?}", result.format());
                    for (i, point) in result.points().iter().enumerate() {
                        println!("Point[{i}]: ({}, {})", point.x, point.y);
                    }
                }
                println!("{}", result.text());
            }
            !opts.test_mode || matches_fixture(path, &results)
        }
        _ => {
            eprintln!("{}: no barcode found", path.display());
            false
        }
    }
}

fn decode_with_binarizer<B>(binarizer: B, hints: &DecodeHints, search_multi: bool) -> prismcode::common::Result<Vec<prismcode::RXingResult>>
where
    B: prismcode::common::Binarizer + 'static,
{
    let bitmap = BinaryBitmap::new(binarizer);
    if search_multi {
        let mut scanner = prismcode::multi::GenericMultipleBarcodeReader::new(MultiFormatReader::new(hints));
        use prismcode::multi::MultipleBarcodeReader;
        scanner.decode_multiple(&bitmap)
    } else {
        let mut reader = MultiFormatReader::new(hints);
        reader.decode(&bitmap).map(|r| vec![r])
    }
}

/// `--test-mode`: a sibling `IMAGE.txt` (UTF-8) or `IMAGE.bin` (raw bytes)
/// holds the expected payload of the first decoded symbol.
fn matches_fixture(image_path: &Path, results: &[prismcode::RXingResult]) -> bool {
    let Some(first) = results.first() else {
        return false;
    };

    let txt_path = with_appended_extension(image_path, "txt");
    if let Ok(expected) = std::fs::read_to_string(&txt_path) {
        return first.text() == expected;
    }

    let bin_path = with_appended_extension(image_path, "bin");
    if let Ok(expected) = std::fs::read(&bin_path) {
        return first.raw_bytes() == expected.as_slice();
    }

    false
}

fn with_appended_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
