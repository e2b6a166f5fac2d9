/*
[INPUT]:  Declarative chain table (embedded YAML or operator-supplied file)
[OUTPUT]: Validated wallet <-> aggregator chain id registry
[POS]:    Chain layer - cross-chain identifier mapping
[UPDATE]: When the table schema or validation rules change
*/

pub mod registry;

pub use registry::{ChainRegistry, NATIVE_TOKEN_ADDRESS, RegistryError, is_native_token};
