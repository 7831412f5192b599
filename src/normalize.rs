/*
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
//! Normalization helpers shared across vendor dialects.
use std::str::FromStr;

use crate::BmcError;

/// Makes the raw processor string comparable across vendors: the clock
/// frequency suffix is dropped and the rest is trimmed and lower-cased.
///
/// "Intel(R) Xeon(R) CPU E5-2620 v4 @ 2.10GHz" -> "intel(r) xeon(r) cpu e5-2620 v4"
pub fn standardize_processor_name(raw: &str) -> String {
    raw.split('@')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Parses a numeric field out of a vendor document, turning a parse failure
/// into a decode-class error naming the field.
pub(crate) fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, BmcError> {
    value.trim().parse().map_err(|_| BmcError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn processor_name_drops_frequency_and_case() {
        assert_eq!(
            standardize_processor_name("Intel(R) Xeon(R) CPU E5-2620 v4 @ 2.10GHz"),
            "intel(r) xeon(r) cpu e5-2620 v4"
        );
        assert_eq!(standardize_processor_name("  AMD EPYC 7402P "), "amd epyc 7402p");
        assert_eq!(standardize_processor_name(""), "");
    }

    #[test]
    fn parse_field_names_the_offender() {
        assert_eq!(parse_field::<i64>("power", " 750 ").unwrap(), 750);
        let err = parse_field::<i64>("power", "n/a").unwrap_err();
        assert!(err.to_string().contains("power"));
        assert!(err.to_string().contains("n/a"));
    }
}
