//! Models of the three token contracts.

pub mod erc1155;
pub mod erc20;
pub mod erc721;

use crate::model::ModelFactory;

/// Every hosted contract, by compiled name.
pub fn builtin() -> [(&'static str, ModelFactory); 3] {
    [
        (erc20::NAME, erc20::construct as ModelFactory),
        (erc721::NAME, erc721::construct as ModelFactory),
        (erc1155::NAME, erc1155::construct as ModelFactory),
    ]
}
