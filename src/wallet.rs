use alloy::{network::EthereumWallet, primitives::Address};
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};

/// BIP-44 account path shared by every derived wallet, the account index is appended
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0";
pub const DEFAULT_WALLET_COUNT: u32 = 20;

/// Local signers derived from one mnemonic, the console picks its sender among them
#[derive(Clone)]
pub struct HdWallets {
    signers: Vec<PrivateKeySigner>,
}

impl HdWallets {
    pub fn from_mnemonic(phrase: &str, count: u32) -> eyre::Result<Self> {
        let signers = (0..count)
            .map(|index| {
                MnemonicBuilder::<English>::default()
                    .phrase(phrase.trim())
                    .derivation_path(format!("{DEFAULT_DERIVATION_PATH}/{index}"))
                    .and_then(|builder| builder.build())
                    .map_err(|e| eyre::eyre!("failed to derive wallet #{index} from mnemonic: {e}"))
            })
            .collect::<eyre::Result<Vec<_>>>()?;
        Ok(Self { signers })
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.signers.iter().map(PrivateKeySigner::address).collect()
    }

    /// Every derived signer registered under its address, the first one is the default
    pub fn ethereum_wallet(&self) -> Option<EthereumWallet> {
        let (first, rest) = self.signers.split_first()?;
        let mut wallet = EthereumWallet::new(first.clone());
        for signer in rest {
            wallet.register_signer(signer.clone());
        }
        Some(wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

    #[test]
    fn test_derives_hardhat_accounts() {
        let wallets = HdWallets::from_mnemonic(TEST_MNEMONIC, 2).unwrap();
        let addresses: Vec<String> = wallets
            .addresses()
            .iter()
            .map(|address| address.to_string())
            .collect();
        assert_eq!(
            addresses,
            vec![
                "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
                "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            ]
        );
        assert!(wallets.ethereum_wallet().is_some());
    }

    #[test]
    fn test_rejects_invalid_mnemonic() {
        assert!(HdWallets::from_mnemonic("not a valid phrase", 1).is_err());
    }

    #[test]
    fn test_no_wallet_without_signers() {
        let wallets = HdWallets::from_mnemonic(TEST_MNEMONIC, 0).unwrap();
        assert!(wallets.addresses().is_empty());
        assert!(wallets.ethereum_wallet().is_none());
    }
}
