//! Solidity interfaces of the deployed contracts, used to encode call data.

use alloy_sol_types::sol;

sol! {
    /// NFA factory
    interface INfaProvider {
        function createNFA(string name, string symbol, bytes32 offchainNFAData) external returns (address);
        function createNFAWithPayment(address token, string name, string symbol, bytes32 offchainNFAData) external returns (address);
    }
}

sol! {
    /// MOR payment token
    interface IMorToken {
        function faucet() external;
        function approve(address spender, uint256 amount) external returns (bool);
    }
}
