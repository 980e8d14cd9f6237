use std::fmt::Display;

use crate::object::UrlKind;

pub struct Network {
    pub name: &'static str,
    pub chain_id: u64,
    // `{infura}` and `{alchemy}` are replaced with the API keys from the environment
    pub rpc_url: &'static str,
    pub explorer: Option<&'static str>,
}

pub const MAINNET: Network = Network {
    name: "mainnet",
    chain_id: 1,
    rpc_url: "https://mainnet.infura.io/v3/{infura}",
    explorer: Some("https://etherscan.io"),
};

pub const GOERLI: Network = Network {
    name: "goerli",
    chain_id: 5,
    rpc_url: "https://goerli.infura.io/v3/{infura}",
    explorer: Some("https://goerli.etherscan.io"),
};

pub const OPTIMISM: Network = Network {
    name: "optimism",
    chain_id: 10,
    rpc_url: "https://optimism.infura.io/v3/{infura}",
    explorer: Some("https://optimistic.etherscan.io"),
};

pub const BSC: Network = Network {
    name: "bsc",
    chain_id: 56,
    rpc_url: "https://bsc-dataseed1.binance.org",
    explorer: Some("https://bscscan.com"),
};

pub const POLYGON_MAINNET: Network = Network {
    name: "polygon-mainnet",
    chain_id: 137,
    rpc_url: "https://polygon-mainnet.infura.io/v3/{infura}",
    explorer: Some("https://polygonscan.com"),
};

pub const ARBITRUM: Network = Network {
    name: "arbitrum",
    chain_id: 42161,
    rpc_url: "https://arb-mainnet.g.alchemy.com/v2/{alchemy}",
    explorer: Some("https://arbiscan.io"),
};

pub const ARBITRUM_GOERLI: Network = Network {
    name: "arbitrum-goerli",
    chain_id: 421613,
    rpc_url: "https://arb-goerli.g.alchemy.com/v2/{alchemy}",
    explorer: Some("https://goerli.arbiscan.io"),
};

pub const AVALANCHE: Network = Network {
    name: "avalanche",
    chain_id: 43114,
    rpc_url: "https://api.avax.network/ext/bc/C/rpc",
    explorer: Some("https://snowtrace.io"),
};

pub const POLYGON_MUMBAI: Network = Network {
    name: "polygon-mumbai",
    chain_id: 80001,
    rpc_url: "https://polygon-mumbai.infura.io/v3/{infura}",
    explorer: Some("https://mumbai.polygonscan.com"),
};

pub const HARDHAT: Network = Network {
    name: "hardhat",
    chain_id: 31337,
    rpc_url: "http://127.0.0.1:8545",
    explorer: None,
};

pub static NETWORKS: [Network; 10] = [
    MAINNET,
    GOERLI,
    OPTIMISM,
    BSC,
    POLYGON_MAINNET,
    ARBITRUM,
    ARBITRUM_GOERLI,
    AVALANCHE,
    POLYGON_MUMBAI,
    HARDHAT,
];

impl Network {
    pub fn by_name(name: &str) -> eyre::Result<&'static Network> {
        NETWORKS
            .iter()
            .find(|network| network.name == name)
            .ok_or(eyre::eyre!("unknown network {name}"))
    }

    pub fn by_chain_id(chain_id: u64) -> Option<&'static Network> {
        NETWORKS.iter().find(|network| network.chain_id == chain_id)
    }

    pub fn resolve_rpc_url(&self) -> String {
        let infura = std::env::var("INFURA_API_KEY").unwrap_or_default();
        let alchemy = std::env::var("ALCHEMY_API_KEY").unwrap_or_default();
        self.rpc_url
            .replace("{infura}", &infura)
            .replace("{alchemy}", &alchemy)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.chain_id)
    }
}

pub fn network_name(chain_id: u64) -> Option<&'static str> {
    Network::by_chain_id(chain_id).map(|network| network.name)
}

/// Operator-facing link for an address or transaction, the bare value when the chain has no explorer
pub fn explorer_url(chain_id: u64, kind: UrlKind, value: &str) -> String {
    let Some(explorer) = Network::by_chain_id(chain_id).and_then(|network| network.explorer) else {
        return value.to_string();
    };
    match kind {
        UrlKind::Address => format!("{explorer}/address/{value}"),
        UrlKind::Tx => format!("{explorer}/tx/{value}"),
    }
}
