use alloy_primitives::U256;
use alloy_sol_types::SolCall;

use crate::Counter;

/// Functions of the `Counter` contract reachable from the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFunction {
    IncrementCount,
    DecrementCount,
    SetCount,
    GetCount,
}

impl CounterFunction {
    pub const ALL: [CounterFunction; 4] = [
        CounterFunction::IncrementCount,
        CounterFunction::DecrementCount,
        CounterFunction::SetCount,
        CounterFunction::GetCount,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CounterFunction::IncrementCount => "incrementCount",
            CounterFunction::DecrementCount => "decrementCount",
            CounterFunction::SetCount => "setCount",
            CounterFunction::GetCount => "getCount",
        }
    }

    pub fn signature(&self) -> &'static str {
        match self {
            CounterFunction::IncrementCount => Counter::incrementCountCall::SIGNATURE,
            CounterFunction::DecrementCount => Counter::decrementCountCall::SIGNATURE,
            CounterFunction::SetCount => Counter::setCountCall::SIGNATURE,
            CounterFunction::GetCount => Counter::getCountCall::SIGNATURE,
        }
    }

    pub fn selector(&self) -> [u8; 4] {
        match self {
            CounterFunction::IncrementCount => Counter::incrementCountCall::SELECTOR,
            CounterFunction::DecrementCount => Counter::decrementCountCall::SELECTOR,
            CounterFunction::SetCount => Counter::setCountCall::SELECTOR,
            CounterFunction::GetCount => Counter::getCountCall::SELECTOR,
        }
    }

    // `getCount` is a view function and is served by `eth_call`
    pub fn is_mutating(&self) -> bool {
        !matches!(self, CounterFunction::GetCount)
    }
}

/// A fully resolved call, arguments included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterCall {
    IncrementCount,
    DecrementCount,
    SetCount(u128),
    GetCount,
}

impl CounterCall {
    pub fn function(&self) -> CounterFunction {
        match self {
            CounterCall::IncrementCount => CounterFunction::IncrementCount,
            CounterCall::DecrementCount => CounterFunction::DecrementCount,
            CounterCall::SetCount(_) => CounterFunction::SetCount,
            CounterCall::GetCount => CounterFunction::GetCount,
        }
    }

    pub fn calldata(&self) -> Vec<u8> {
        match self {
            CounterCall::IncrementCount => Counter::incrementCountCall {}.abi_encode(),
            CounterCall::DecrementCount => Counter::decrementCountCall {}.abi_encode(),
            CounterCall::SetCount(count) => Counter::setCountCall {
                count: U256::from(*count),
            }
            .abi_encode(),
            CounterCall::GetCount => Counter::getCountCall {}.abi_encode(),
        }
    }
}

/// Decodes the `getCount` return data, counts above 128 bits are rejected
pub fn decode_count(output: &[u8]) -> eyre::Result<u128> {
    let count = Counter::getCountCall::abi_decode_returns(output)?;
    u128::try_from(count).map_err(|_| eyre::eyre!("count {count} exceeds 128 bits"))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::keccak256;
    use alloy_sol_types::SolValue;

    use super::*;

    #[test]
    fn test_selectors_follow_signatures() {
        for function in CounterFunction::ALL {
            assert!(function.signature().starts_with(function.name()));
            assert_eq!(
                function.selector(),
                keccak256(function.signature().as_bytes())[..4]
            );
        }
        assert_eq!(CounterFunction::SetCount.signature(), "setCount(uint256)");
    }

    #[test]
    fn test_set_count_calldata_layout() {
        let data = CounterCall::SetCount(258).calldata();
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[..4], &CounterFunction::SetCount.selector());
        assert_eq!(&data[34..], &[1, 2]);
    }

    #[test]
    fn test_argumentless_calls_are_bare_selectors() {
        for call in [
            CounterCall::IncrementCount,
            CounterCall::DecrementCount,
            CounterCall::GetCount,
        ] {
            assert_eq!(call.calldata(), call.function().selector().to_vec());
            assert_ne!(call.function().is_mutating(), call == CounterCall::GetCount);
        }
    }

    #[test]
    fn test_decode_count_bounds() {
        assert_eq!(decode_count(&U256::from(5).abi_encode()).unwrap(), 5);
        assert!(decode_count(&U256::MAX.abi_encode()).is_err());
        assert!(decode_count(&[0u8; 31]).is_err());
    }
}
