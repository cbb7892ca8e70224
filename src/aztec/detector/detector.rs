/*
 * Copyright 2010 ZXing authors
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

use crate::common::reedsolomon::{get_predefined_genericgf, PredefinedGenericGf, ReedSolomonDecoder};
use crate::common::{sample_grid, BitMatrix, PerspectiveTransform, Result, WhiteRectangleDetector};
use crate::{Exceptions, Point};

use super::AztecDetectorResult;

/// Observed Hamming-distance-8 rotation patterns for the 12-bit corner
/// locator read off the bullseye's four sides; see `get_rotation`.
const ROTATION_PATTERNS: [u32; 4] = [0x1D4, 0x2A3, 0x0D9, 0x167];

/// Integer-pixel coordinate, distinct from the symbol-space `Point` used
/// for the corners handed to the perspective transform: every walk
/// across the bullseye rings works a pixel at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridPoint {
    x: i32,
    y: i32,
}

impl GridPoint {
    fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Locates an Aztec symbol by its concentric bullseye rather than a
/// corner/finder search: finds the image center, walks outward ring by
/// ring until the alternating black/white squares stop matching, reads
/// the mode message off the bullseye's four sides to learn the layer
/// count and data block count, then samples the full symbol grid.
pub struct Detector<'m> {
    image: &'m BitMatrix,
    compact: bool,
    nb_layers: u32,
    nb_data_blocks: u32,
    nb_center_layers: u32,
    shift: u32,
    width: i32,
    height: i32,
}

impl<'m> Detector<'m> {
    pub fn new(image: &'m BitMatrix) -> Self {
        Self {
            image,
            compact: false,
            nb_layers: 0,
            nb_data_blocks: 0,
            nb_center_layers: 0,
            shift: 0,
            width: image.width() as i32,
            height: image.height() as i32,
        }
    }

    pub fn detect(&mut self) -> Result<AztecDetectorResult> {
        let p_center = self.get_matrix_center();
        let bulls_eye_corners = self.get_bulls_eye_corners(p_center)?;

        self.extract_parameters(&bulls_eye_corners)?;

        let bits = self.sample_grid(
            bulls_eye_corners[(self.shift % 4) as usize],
            bulls_eye_corners[((self.shift + 1) % 4) as usize],
            bulls_eye_corners[((self.shift + 2) % 4) as usize],
            bulls_eye_corners[((self.shift + 3) % 4) as usize],
        )?;

        let corners = self.get_matrix_corner_points(&bulls_eye_corners);

        Ok(AztecDetectorResult::new(bits, corners, self.compact, self.nb_data_blocks, self.nb_layers))
    }

    /// Finds the symbol's center: first by the shared white-rectangle
    /// detector (the bullseye's outer ring reads as a white square
    /// against the quiet zone), falling back to walking diagonally out
    /// from the image's own center when that detector comes up empty
    /// (true when the seed rectangle starts inside the bullseye itself).
    fn get_matrix_center(&self) -> GridPoint {
        let corners = WhiteRectangleDetector::new(self.image).and_then(|d| d.detect()).ok();

        let (mut a, mut b, mut c, mut d) = match corners {
            Some([pa, pb, pc, pd]) => (
                GridPoint::new(pa.x.round() as i32, pa.y.round() as i32),
                GridPoint::new(pb.x.round() as i32, pb.y.round() as i32),
                GridPoint::new(pc.x.round() as i32, pc.y.round() as i32),
                GridPoint::new(pd.x.round() as i32, pd.y.round() as i32),
            ),
            None => {
                let cx = self.width / 2;
                let cy = self.height / 2;
                (
                    self.get_first_different(GridPoint::new(cx + 7, cy - 7), false, 1, -1),
                    self.get_first_different(GridPoint::new(cx + 7, cy + 7), false, 1, 1),
                    self.get_first_different(GridPoint::new(cx - 7, cy + 7), false, -1, 1),
                    self.get_first_different(GridPoint::new(cx - 7, cy - 7), false, -1, -1),
                )
            }
        };

        let mut cx = ((a.x + d.x + b.x + c.x) as f32 / 4.0).round() as i32;
        let mut cy = ((a.y + d.y + b.y + c.y) as f32 / 4.0).round() as i32;

        let recentered = WhiteRectangleDetector::with_seed(self.image, 15, cx, cy).and_then(|d| d.detect()).ok();

        match recentered {
            Some([pa, pb, pc, pd]) => {
                a = GridPoint::new(pa.x.round() as i32, pa.y.round() as i32);
                b = GridPoint::new(pb.x.round() as i32, pb.y.round() as i32);
                c = GridPoint::new(pc.x.round() as i32, pc.y.round() as i32);
                d = GridPoint::new(pd.x.round() as i32, pd.y.round() as i32);
            }
            None => {
                a = self.get_first_different(GridPoint::new(cx + 7, cy - 7), false, 1, -1);
                b = self.get_first_different(GridPoint::new(cx + 7, cy + 7), false, 1, 1);
                c = self.get_first_different(GridPoint::new(cx - 7, cy + 7), false, -1, 1);
                d = self.get_first_different(GridPoint::new(cx - 7, cy - 7), false, -1, -1);
            }
        }

        cx = ((a.x + d.x + b.x + c.x) as f32 / 4.0).round() as i32;
        cy = ((a.y + d.y + b.y + c.y) as f32 / 4.0).round() as i32;

        GridPoint::new(cx, cy)
    }

    /// Walks outward from the center one alternating ring at a time
    /// until the black/white square stops being square (`q` outside
    /// [0.75, 1.25]) or stops being uniformly colored on each edge;
    /// a well-formed bullseye always stops after 5 rings (compact) or
    /// 7 rings (full-size).
    fn get_bulls_eye_corners(&mut self, p_center: GridPoint) -> Result<[Point; 4]> {
        let mut pina = p_center;
        let mut pinb = p_center;
        let mut pinc = p_center;
        let mut pind = p_center;

        let mut color = true;
        let mut nb_center_layers = 0u32;

        for layer in 1..9u32 {
            nb_center_layers = layer;
            let pouta = self.get_first_different(pina, color, 1, -1);
            let poutb = self.get_first_different(pinb, color, 1, 1);
            let poutc = self.get_first_different(pinc, color, -1, 1);
            let poutd = self.get_first_different(pind, color, -1, -1);

            if layer > 2 {
                let q = Self::distance(poutd, pouta) * layer as f32 / (Self::distance(pind, pina) * (layer + 2) as f32);
                if !(0.75..=1.25).contains(&q) || !self.is_white_or_black_rectangle(pouta, poutb, poutc, poutd) {
                    break;
                }
            }

            pina = pouta;
            pinb = poutb;
            pinc = poutc;
            pind = poutd;
            color = !color;
        }

        if nb_center_layers != 5 && nb_center_layers != 7 {
            return Err(Exceptions::not_found_with("aztec bullseye did not settle on 5 or 7 rings"));
        }

        self.compact = nb_center_layers == 5;
        self.nb_center_layers = nb_center_layers;

        let pinax = Point::new(pina.x as f32 + 0.5, pina.y as f32 - 0.5);
        let pinbx = Point::new(pinb.x as f32 + 0.5, pinb.y as f32 + 0.5);
        let pincx = Point::new(pinc.x as f32 - 0.5, pinc.y as f32 + 0.5);
        let pindx = Point::new(pind.x as f32 - 0.5, pind.y as f32 - 0.5);

        Ok(Self::expand_square(
            [pinax, pinbx, pincx, pindx],
            (2 * nb_center_layers - 3) as f32,
            (2 * nb_center_layers) as f32,
        ))
    }

    /// Reads the mode message off the bullseye's four sides and decodes
    /// it into `nb_layers`/`nb_data_blocks`, after fixing the rotation
    /// (which of the four corners is logically "top-left") and
    /// correcting the message with Reed-Solomon over `AZTEC_PARAM`.
    fn extract_parameters(&mut self, bulls_eye_corners: &[Point; 4]) -> Result<()> {
        for p in bulls_eye_corners {
            if !self.is_valid_point(*p) {
                return Err(Exceptions::not_found_with("aztec bullseye corner lies outside the image"));
            }
        }

        let length = 2 * self.nb_center_layers;
        let sides = [
            self.sample_line(bulls_eye_corners[0], bulls_eye_corners[1], length),
            self.sample_line(bulls_eye_corners[1], bulls_eye_corners[2], length),
            self.sample_line(bulls_eye_corners[2], bulls_eye_corners[3], length),
            self.sample_line(bulls_eye_corners[3], bulls_eye_corners[0], length),
        ];

        self.shift = Self::get_rotation(&sides, length);

        let mut parameter_data: u64 = 0;
        for i in 0..4u32 {
            let side = sides[((self.shift + i) % 4) as usize];
            if self.compact {
                parameter_data <<= 7;
                parameter_data += (side >> 1 & 0x7F) as u64;
            } else {
                parameter_data <<= 10;
                parameter_data += ((side >> 2 & (0x1f << 5)) + (side >> 1 & 0x1f)) as u64;
            }
        }

        let corrected_data = Self::get_corrected_parameter_data(parameter_data, self.compact)?;

        if self.compact {
            self.nb_layers = (corrected_data >> 6) + 1;
            self.nb_data_blocks = (corrected_data & 0x3F) + 1;
        } else {
            self.nb_layers = (corrected_data >> 11) + 1;
            self.nb_data_blocks = (corrected_data & 0x7FF) + 1;
        }

        Ok(())
    }

    fn get_corrected_parameter_data(mut parameter_data: u64, compact: bool) -> Result<u32> {
        let (num_codewords, num_data_codewords) = if compact { (7usize, 2usize) } else { (10usize, 4usize) };
        let num_ec_codewords = num_codewords - num_data_codewords;

        let mut parameter_words = vec![0i32; num_codewords];
        for word in parameter_words.iter_mut().rev() {
            *word = (parameter_data & 0xF) as i32;
            parameter_data >>= 4;
        }

        let field = get_predefined_genericgf(PredefinedGenericGf::AztecParam);
        let rs_decoder = ReedSolomonDecoder::new(field);
        rs_decoder
            .decode(&mut parameter_words, num_ec_codewords)
            .map_err(|_| Exceptions::not_found_with("aztec mode message failed reed-solomon correction"))?;

        let mut result = 0u32;
        for value in parameter_words.iter().take(num_data_codewords) {
            result = (result << 4) + *value as u32;
        }
        Ok(result)
    }

    /// Which of the four observed sides is actually the "top" one: each
    /// side carries 2 bits of a shared 12-bit locator pattern, and the
    /// four possible rotations have pairwise Hamming distance 8, so the
    /// best-matching rotation is unambiguous even with a few bit errors.
    fn get_rotation(sides: &[u32; 4], length: u32) -> u32 {
        let mut corner_bits: u32 = 0;
        for &side in sides {
            let t = (side >> (length - 2) << 1) + (side & 1);
            corner_bits = (corner_bits << 3) + t;
        }
        corner_bits = ((corner_bits & 1) << 11) + (corner_bits >> 1);

        let mut best_match = 0u32;
        let mut best_match_count: i32 = -1;
        for (shift, &pattern) in ROTATION_PATTERNS.iter().enumerate() {
            let match_count = (corner_bits & pattern).count_ones() as i32;
            if match_count > best_match_count {
                best_match_count = match_count;
                best_match = shift as u32;
            }
        }
        best_match
    }

    fn sample_line(&self, p1: Point, p2: Point, size: u32) -> u32 {
        let mut result = 0u32;
        let d = Point::distance(p1, p2);
        let module_size = d / size as f32;
        let dx = module_size * (p2.x - p1.x) / d;
        let dy = module_size * (p2.y - p1.y) / d;
        for i in 0..size {
            let x = (p1.x + i as f32 * dx).round() as u32;
            let y = (p1.y + i as f32 * dy).round() as u32;
            if self.image.get(x, y) {
                result |= 1 << (size - i - 1);
            }
        }
        result
    }

    fn get_dimension(&self) -> u32 {
        if self.compact {
            return 4 * self.nb_layers + 11;
        }
        if self.nb_layers <= 4 {
            return 4 * self.nb_layers + 15;
        }
        4 * self.nb_layers + 2 * ((self.nb_layers - 4) / 8 + 1) + 15
    }

    fn sample_grid(&self, top_left: Point, bottom_left: Point, bottom_right: Point, top_right: Point) -> Result<BitMatrix> {
        let dimension = self.get_dimension();
        let low = dimension as f32 / 2.0 - self.nb_center_layers as f32;
        let high = dimension as f32 / 2.0 + self.nb_center_layers as f32;

        let transform = PerspectiveTransform::quadrilateral_to_quadrilateral(
            low,
            low,
            high,
            low,
            high,
            high,
            low,
            high,
            top_left.x,
            top_left.y,
            top_right.x,
            top_right.y,
            bottom_right.x,
            bottom_right.y,
            bottom_left.x,
            bottom_left.y,
        );

        sample_grid(self.image, dimension, dimension, &transform)
    }

    fn get_matrix_corner_points(&self, bulls_eye_corners: &[Point; 4]) -> Vec<Point> {
        let dimension = self.get_dimension() as f32;
        Self::expand_square(*bulls_eye_corners, (2 * self.nb_center_layers) as f32, dimension).to_vec()
    }

    /// Re-centers and rescales a square described by its four corners
    /// from `old_side` to `new_side`, used both to push the raw
    /// bullseye-ring corners out by half a module and to grow the
    /// bullseye square all the way out to the full symbol.
    fn expand_square(points: [Point; 4], old_side: f32, new_side: f32) -> [Point; 4] {
        let ratio = new_side / (2.0 * old_side);

        let dx = points[0].x - points[2].x;
        let dy = points[0].y - points[2].y;
        let centerx = (points[0].x + points[2].x) / 2.0;
        let centery = (points[0].y + points[2].y) / 2.0;
        let result0 = Point::new(centerx + ratio * dx, centery + ratio * dy);
        let result2 = Point::new(centerx - ratio * dx, centery - ratio * dy);

        let dx = points[1].x - points[3].x;
        let dy = points[1].y - points[3].y;
        let centerx = (points[1].x + points[3].x) / 2.0;
        let centery = (points[1].y + points[3].y) / 2.0;
        let result1 = Point::new(centerx + ratio * dx, centery + ratio * dy);
        let result3 = Point::new(centerx - ratio * dx, centery - ratio * dy);

        [result0, result1, result2, result3]
    }

    fn is_white_or_black_rectangle(&self, p1: GridPoint, p2: GridPoint, p3: GridPoint, p4: GridPoint) -> bool {
        let corr = 3;
        let p1 = GridPoint::new(p1.x - corr, p1.y + corr);
        let p2 = GridPoint::new(p2.x - corr, p2.y - corr);
        let p3 = GridPoint::new(p3.x + corr, p3.y - corr);
        let p4 = GridPoint::new(p4.x + corr, p4.y + corr);

        let c_init = self.get_color(p4, p1);
        if c_init == 0 {
            return false;
        }

        if self.get_color(p1, p2) != c_init {
            return false;
        }
        if self.get_color(p2, p3) != c_init {
            return false;
        }
        self.get_color(p3, p4) == c_init
    }

    /// Traces the pixels between two points and reports whether they
    /// are (mostly) uniformly black (1), uniformly white (-1), or mixed
    /// (0), tolerating up to 10% disagreement either way.
    fn get_color(&self, p1: GridPoint, p2: GridPoint) -> i32 {
        let d = Self::distance(p1, p2);
        if d == 0.0 || !self.is_valid(p1.x, p1.y) {
            return 0;
        }
        let dx = (p2.x - p1.x) as f32 / d;
        let dy = (p2.y - p1.y) as f32 / d;

        let color_model = self.image.get(p1.x as u32, p1.y as u32);

        let mut px = p1.x as f32;
        let mut py = p1.y as f32;
        let mut error = 0;
        let i_max = d.ceil() as i32;
        for _ in 0..i_max {
            px += dx;
            py += dy;
            let rx = px.round() as i32;
            let ry = py.round() as i32;
            if !self.is_valid(rx, ry) {
                continue;
            }
            if self.image.get(rx as u32, ry as u32) != color_model {
                error += 1;
            }
        }

        let err_ratio = error as f32 / d;
        if err_ratio > 0.1 && err_ratio < 0.9 {
            return 0;
        }
        if (err_ratio <= 0.1) == color_model {
            1
        } else {
            -1
        }
    }

    fn get_first_different(&self, init: GridPoint, color: bool, dx: i32, dy: i32) -> GridPoint {
        let mut x = init.x + dx;
        let mut y = init.y + dy;

        while self.is_valid(x, y) && self.image.get(x as u32, y as u32) == color {
            x += dx;
            y += dy;
        }
        x -= dx;
        y -= dy;

        while self.is_valid(x, y) && self.image.get(x as u32, y as u32) == color {
            x += dx;
        }
        x -= dx;

        while self.is_valid(x, y) && self.image.get(x as u32, y as u32) == color {
            y += dy;
        }
        y -= dy;

        GridPoint::new(x, y)
    }

    fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn is_valid_point(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x < self.width as f32 && p.y >= 0.0 && p.y < self.height as f32
    }

    fn distance(a: GridPoint, b: GridPoint) -> f32 {
        (((a.x - b.x) as f32).powi(2) + ((a.y - b.y) as f32).powi(2)).sqrt()
    }
}
