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

mod alignment_pattern;
mod alignment_pattern_finder;
mod detector;
mod finder_pattern;
mod finder_pattern_finder;
mod finder_pattern_info;

pub use alignment_pattern::AlignmentPattern;
pub use alignment_pattern_finder::AlignmentPatternFinder;
pub use detector::Detector;
pub use finder_pattern::FinderPattern;
pub use finder_pattern_finder::FinderPatternFinder;
pub use finder_pattern_info::FinderPatternInfo;
