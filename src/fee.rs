use tracing::debug;

use crate::{
    object::{FeeConfiguration, FeeHints, FeeMode},
    prompt::{ask_for, ask_for_number, print_invalid_input, Prompt},
};

const GWEI_DECIMALS: usize = 9;
const GIGA: u128 = 1_000_000_000;

pub struct FeeEstimator;

impl FeeEstimator {
    /// Asks the operator for fee bounds, a zero answer leaves the field to node estimation
    pub fn resolve<P: Prompt + ?Sized>(
        mode: FeeMode,
        hints: &FeeHints,
        prompt: &mut P,
    ) -> eyre::Result<Option<FeeConfiguration>> {
        if mode == FeeMode::Disabled {
            return Ok(None);
        }
        let max_fee_per_gas = ask_for_gwei(prompt, "maxFeePerGas", hints.max_fee_per_gas)?;
        let max_priority_fee_per_gas =
            ask_for_gwei(prompt, "maxPriorityFeePerGas", hints.max_priority_fee_per_gas)?;
        let gas_limit = ask_for_gas_limit(prompt)?;
        let fees = FeeConfiguration {
            max_fee_per_gas,
            max_priority_fee_per_gas,
            gas_limit,
        };
        debug!(?fees, "fee configuration resolved");
        Ok(Some(fees))
    }
}

fn ask_for_gwei<P: Prompt + ?Sized>(
    prompt: &mut P,
    field: &str,
    hint: Option<u128>,
) -> eyre::Result<Option<u128>> {
    let default = format_gwei(hint.unwrap_or_default());
    loop {
        let answer = ask_for(prompt, &format!("{field} in GWei"), Some(default.as_str()))?;
        match parse_gwei(&answer) {
            Some(0) => return Ok(None),
            Some(wei) => return Ok(Some(wei)),
            None => print_invalid_input(prompt, field),
        }
    }
}

fn ask_for_gas_limit<P: Prompt + ?Sized>(prompt: &mut P) -> eyre::Result<Option<u64>> {
    loop {
        let limit = ask_for_number(prompt, "gasLimit in Wei (0 for estimate)", Some("0"))?;
        match u64::try_from(limit) {
            Ok(0) => return Ok(None),
            Ok(limit) => return Ok(Some(limit)),
            Err(_) => print_invalid_input(prompt, "gasLimit"),
        }
    }
}

/// Parses a non-negative decimal amount of gwei into wei, digits below one wei are truncated
///
/// Scientific notation is accepted, `2.5e-1` is a quarter of a gwei.
pub fn parse_gwei(input: &str) -> Option<u128> {
    let input = input.trim();
    let (mantissa, exponent) = match input.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().ok()?),
        None => (input, 0),
    };
    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if !integer.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    // position of the wei unit relative to the last written digit
    let shift = GWEI_DECIMALS as i64 + i64::from(exponent) - fraction.len() as i64;
    let digits = format!("{integer}{fraction}");
    let digits = digits.trim_start_matches('0');
    let kept = match usize::try_from(-shift) {
        Ok(dropped) => &digits[..digits.len().saturating_sub(dropped)],
        Err(_) => digits,
    };
    let mut wei: u128 = 0;
    for digit in kept.bytes() {
        wei = wei.checked_mul(10)?.checked_add(u128::from(digit - b'0'))?;
    }
    if shift > 0 && wei != 0 {
        wei = wei.checked_mul(10u128.checked_pow(u32::try_from(shift).ok()?)?)?;
    }
    Some(wei)
}

pub fn format_gwei(wei: u128) -> String {
    let integer = wei / GIGA;
    let fraction = wei % GIGA;
    if fraction == 0 {
        return integer.to_string();
    }
    let fraction = format!("{fraction:09}");
    format!("{integer}.{}", fraction.trim_end_matches('0'))
}
