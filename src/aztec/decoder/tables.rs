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

/// The five character tables plus the binary escape, latched and
/// shifted between by control codes embedded in the tables themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Table {
    Upper,
    Lower,
    Mixed,
    Punct,
    Digit,
    Binary,
}

/// What a table lookup produces: literal text, a permanent table
/// switch (latch), or a switch that reverts after the next character
/// (shift).
#[derive(Debug, Clone, Copy)]
pub(super) enum Entry {
    Str(&'static str),
    Latch(Table),
    Shift(Table),
}

pub(super) fn get_character(table: Table, code: usize) -> Entry {
    match table {
        Table::Upper => UPPER_TABLE[code],
        Table::Lower => LOWER_TABLE[code],
        Table::Mixed => MIXED_TABLE[code],
        Table::Punct => PUNCT_TABLE[code],
        Table::Digit => DIGIT_TABLE[code],
        Table::Binary => Entry::Str(""),
    }
}

const UPPER_TABLE: [Entry; 32] = [
    Entry::Shift(Table::Punct),
    Entry::Str(" "),
    Entry::Str("A"),
    Entry::Str("B"),
    Entry::Str("C"),
    Entry::Str("D"),
    Entry::Str("E"),
    Entry::Str("F"),
    Entry::Str("G"),
    Entry::Str("H"),
    Entry::Str("I"),
    Entry::Str("J"),
    Entry::Str("K"),
    Entry::Str("L"),
    Entry::Str("M"),
    Entry::Str("N"),
    Entry::Str("O"),
    Entry::Str("P"),
    Entry::Str("Q"),
    Entry::Str("R"),
    Entry::Str("S"),
    Entry::Str("T"),
    Entry::Str("U"),
    Entry::Str("V"),
    Entry::Str("W"),
    Entry::Str("X"),
    Entry::Str("Y"),
    Entry::Str("Z"),
    Entry::Latch(Table::Lower),
    Entry::Latch(Table::Mixed),
    Entry::Latch(Table::Digit),
    Entry::Shift(Table::Binary),
];

const LOWER_TABLE: [Entry; 32] = [
    Entry::Shift(Table::Punct),
    Entry::Str(" "),
    Entry::Str("a"),
    Entry::Str("b"),
    Entry::Str("c"),
    Entry::Str("d"),
    Entry::Str("e"),
    Entry::Str("f"),
    Entry::Str("g"),
    Entry::Str("h"),
    Entry::Str("i"),
    Entry::Str("j"),
    Entry::Str("k"),
    Entry::Str("l"),
    Entry::Str("m"),
    Entry::Str("n"),
    Entry::Str("o"),
    Entry::Str("p"),
    Entry::Str("q"),
    Entry::Str("r"),
    Entry::Str("s"),
    Entry::Str("t"),
    Entry::Str("u"),
    Entry::Str("v"),
    Entry::Str("w"),
    Entry::Str("x"),
    Entry::Str("y"),
    Entry::Str("z"),
    Entry::Shift(Table::Upper),
    Entry::Latch(Table::Mixed),
    Entry::Latch(Table::Digit),
    Entry::Shift(Table::Binary),
];

const MIXED_TABLE: [Entry; 32] = [
    Entry::Shift(Table::Punct),
    Entry::Str(" "),
    Entry::Str("\u{1}"),
    Entry::Str("\u{2}"),
    Entry::Str("\u{3}"),
    Entry::Str("\u{4}"),
    Entry::Str("\u{5}"),
    Entry::Str("\u{6}"),
    Entry::Str("\u{7}"),
    Entry::Str("\u{8}"),
    Entry::Str("\t"),
    Entry::Str("\n"),
    Entry::Str("\u{B}"),
    Entry::Str("\u{C}"),
    Entry::Str("\r"),
    Entry::Str("\u{1B}"),
    Entry::Str("\u{1C}"),
    Entry::Str("\u{1D}"),
    Entry::Str("\u{1E}"),
    Entry::Str("\u{1F}"),
    Entry::Str("@"),
    Entry::Str("\\"),
    Entry::Str("^"),
    Entry::Str("_"),
    Entry::Str("`"),
    Entry::Str("|"),
    Entry::Str("~"),
    Entry::Str("\u{7F}"),
    Entry::Latch(Table::Lower),
    Entry::Latch(Table::Upper),
    Entry::Latch(Table::Punct),
    Entry::Shift(Table::Binary),
];

const PUNCT_TABLE: [Entry; 32] = [
    Entry::Str(""),
    Entry::Str("\r"),
    Entry::Str("\r\n"),
    Entry::Str(". "),
    Entry::Str(", "),
    Entry::Str(": "),
    Entry::Str("!"),
    Entry::Str("\""),
    Entry::Str("#"),
    Entry::Str("$"),
    Entry::Str("%"),
    Entry::Str("&"),
    Entry::Str("'"),
    Entry::Str("("),
    Entry::Str(")"),
    Entry::Str("*"),
    Entry::Str("+"),
    Entry::Str(","),
    Entry::Str("-"),
    Entry::Str("."),
    Entry::Str("/"),
    Entry::Str(":"),
    Entry::Str(";"),
    Entry::Str("<"),
    Entry::Str("="),
    Entry::Str(">"),
    Entry::Str("?"),
    Entry::Str("["),
    Entry::Str("]"),
    Entry::Str("{"),
    Entry::Str("}"),
    Entry::Latch(Table::Upper),
];

const DIGIT_TABLE: [Entry; 16] = [
    Entry::Shift(Table::Punct),
    Entry::Str(" "),
    Entry::Str("0"),
    Entry::Str("1"),
    Entry::Str("2"),
    Entry::Str("3"),
    Entry::Str("4"),
    Entry::Str("5"),
    Entry::Str("6"),
    Entry::Str("7"),
    Entry::Str("8"),
    Entry::Str("9"),
    Entry::Str(","),
    Entry::Str("."),
    Entry::Latch(Table::Upper),
    Entry::Shift(Table::Upper),
];
