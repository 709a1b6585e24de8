/*
[INPUT]:  Wallet provider configuration and sign-in parameters
[OUTPUT]: Uniform async gateway abstraction and test double
[POS]:    Gateway layer - boundary to the external wallet SDK
[UPDATE]: When adding gateway implementations or changing the contract
*/

pub mod mock;
pub mod wallet;

pub use mock::{CallGate, MockHandle, MockWalletGateway};
pub use wallet::WalletGateway;
