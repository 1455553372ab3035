//! Contract bindings used by the market creation workflow.

use alloy_sol_types::sol;

// ERC-20 interface (minimal for allowance checks)
sol! {
    #[sol(rpc)]
    contract IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

sol! {
    #[sol(rpc)]
    contract IMarketFactory {
        function createMarket(
            address oracle,
            uint256 tradingDeadline,
            uint256 resolveTime,
            uint256 liquidityParam,
            string metadataUri
        ) external returns (address);
    }
}
