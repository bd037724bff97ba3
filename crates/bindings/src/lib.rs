//! # waveportal-bindings
//!
//! Static bindings to the deployed WavePortal contract: the callable
//! operations, the `NewWave` event, and the display-shaped [`Wave`] record.
//!
//! The interface is fixed at build time. A mismatch between these bindings
//! and the contract actually deployed at the configured address surfaces as a
//! call or decode error at first use; there is no version negotiation.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use alloy_primitives::{Address, ChainId};
use alloy_sol_types::sol;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

sol! {
    #[sol(rpc)]
    interface IWavePortal {
        #[derive(Debug)]
        struct Wave {
            address waver;
            string message;
            uint256 timestamp;
        }

        function wave(string calldata message) external;

        #[derive(Debug)]
        function getAllWaves() external view returns (Wave[] memory);

        #[derive(Debug)]
        function getTotalWaves() external view returns (uint256);

        #[derive(Debug)]
        event NewWave(address indexed from, uint256 timestamp, string message);
    }
}

/// Where the portal contract lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// The contract address.
    pub address: Address,
    /// The chain the contract is deployed on.
    pub chain_id: ChainId,
}

/// One recorded wave, shaped for display.
///
/// Waves are immutable once created; they are only ever read in bulk from
/// `getAllWaves` or received incrementally from the `NewWave` event stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wave {
    /// The account that sent the wave.
    pub sender: Address,
    /// Seconds since the unix epoch, as recorded on chain.
    pub timestamp: u64,
    /// The message text. Bounded only by gas cost, not by the client.
    pub message: String,
}

impl Wave {
    /// The wave's timestamp rendered as a local date-time string.
    pub fn local_time(&self) -> String {
        DateTime::from_timestamp(self.timestamp as i64, 0)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| self.timestamp.to_string())
    }
}

impl From<IWavePortal::Wave> for Wave {
    fn from(wave: IWavePortal::Wave) -> Self {
        Self {
            sender: wave.waver,
            timestamp: wave.timestamp.saturating_to(),
            message: wave.message,
        }
    }
}

impl From<IWavePortal::NewWave> for Wave {
    fn from(event: IWavePortal::NewWave) -> Self {
        Self {
            sender: event.from,
            timestamp: event.timestamp.saturating_to(),
            message: event.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, address};
    use alloy_sol_types::{SolCall, SolEvent};

    #[test]
    fn interface_signatures() {
        assert_eq!(IWavePortal::waveCall::SIGNATURE, "wave(string)");
        assert_eq!(IWavePortal::getAllWavesCall::SIGNATURE, "getAllWaves()");
        assert_eq!(IWavePortal::getTotalWavesCall::SIGNATURE, "getTotalWaves()");
        assert_eq!(IWavePortal::NewWave::SIGNATURE, "NewWave(address,uint256,string)");
    }

    #[test]
    fn wave_call_roundtrip() {
        let call = IWavePortal::waveCall { message: "gm".to_string() };
        let encoded = call.abi_encode();
        assert_eq!(&encoded[..4], IWavePortal::waveCall::SELECTOR);

        let decoded = IWavePortal::waveCall::abi_decode(&encoded).unwrap();
        assert_eq!(decoded.message, "gm");
    }

    #[test]
    fn new_wave_log_roundtrip() {
        let event = IWavePortal::NewWave {
            from: address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            timestamp: U256::from(1_700_000_000u64),
            message: "hello".to_string(),
        };

        let log = event.encode_log_data();
        let decoded = IWavePortal::NewWave::decode_log_data(&log).unwrap();
        assert_eq!(decoded.from, event.from);
        assert_eq!(decoded.timestamp, event.timestamp);
        assert_eq!(decoded.message, "hello");
    }

    #[test]
    fn wave_from_onchain_tuple() {
        let onchain = IWavePortal::Wave {
            waver: address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"),
            message: "wave!".to_string(),
            timestamp: U256::from(1_700_000_000u64),
        };

        let wave = Wave::from(onchain);
        assert_eq!(wave.sender, address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"));
        assert_eq!(wave.timestamp, 1_700_000_000);
        assert_eq!(wave.message, "wave!");
    }

    #[test]
    fn wave_from_event() {
        let event = IWavePortal::NewWave {
            from: address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            timestamp: U256::from(42u64),
            message: "first".to_string(),
        };

        let wave = Wave::from(event);
        assert_eq!(wave.sender, address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));
        assert_eq!(wave.timestamp, 42);
        assert_eq!(wave.message, "first");
    }

    #[test]
    fn oversized_timestamp_saturates() {
        let onchain = IWavePortal::Wave {
            waver: Address::ZERO,
            message: String::new(),
            timestamp: U256::MAX,
        };
        assert_eq!(Wave::from(onchain).timestamp, u64::MAX);
    }

    #[test]
    fn local_time_is_formatted() {
        let wave = Wave {
            sender: Address::ZERO,
            timestamp: 1_700_000_000,
            message: String::new(),
        };
        let rendered = wave.local_time();
        // `2023-..-.. ..:..:..` in whatever the local offset is.
        assert_eq!(rendered.len(), 19);
        assert!(rendered.contains('-') && rendered.contains(':'));
    }
}
