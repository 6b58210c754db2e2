//! Specification and package documents.

use msfsm_01_specification::{Package, PackageSet, Specification, SpecificationError};

/// Five automatons with the dependency edges
/// `1 → {0, 2, 3}`, `2 → 0`, `3 → 2`, `4 → 3`.
pub const REFERENCE_DAG: &str = r#"{
    "name": "ReferenceDag",
    "automatons": {
        "Automata0": {
            "states": ["idle", "done"],
            "transitions": [
                {"source": "idle", "destination": "done", "trigger": "finish", "conditions": []}
            ]
        },
        "Automata1": {
            "states": ["idle", "done"],
            "transitions": [
                {"source": "idle", "destination": "done", "trigger": "finish",
                 "conditions": ["automata__Automata0__is_completed",
                                "automata__Automata2__is_completed",
                                "automata__Automata3__is_completed"]}
            ]
        },
        "Automata2": {
            "states": ["idle", "done"],
            "transitions": [
                {"source": "idle", "destination": "done", "trigger": "finish",
                 "conditions": ["automata__Automata0__is_completed"]}
            ]
        },
        "Automata3": {
            "states": ["idle", "done"],
            "transitions": [
                {"source": "idle", "destination": "done", "trigger": "finish",
                 "conditions": ["automata__Automata2__is_completed"]}
            ]
        },
        "Automata4": {
            "states": ["idle", "done"],
            "transitions": [
                {"source": "idle", "destination": "done", "trigger": "finish",
                 "conditions": ["automata__Automata3__is_completed"]}
            ]
        }
    },
    "required_packages": []
}"#;

/// Order fulfilment: shipping waits for payment, the order waits for both.
pub const SHOP: &str = r#"{
    "name": "Shop",
    "automatons": {
        "Order": {
            "states": ["open", "closed"],
            "transitions": [
                {"source": "open", "destination": "closed", "trigger": "close",
                 "conditions": ["automata__Payment__is_completed",
                                "automata__Shipping__is_completed"]}
            ]
        },
        "Shipping": {
            "states": ["waiting", "shipped"],
            "transitions": [
                {"source": "waiting", "destination": "shipped", "trigger": "ship",
                 "conditions": ["automata__Payment__is_completed", "package__stock__available"]}
            ]
        },
        "Payment": {
            "states": ["pending", "paid"],
            "transitions": [
                {"source": "pending", "destination": "paid", "trigger": "pay",
                 "conditions": ["package__wallet__funded"]}
            ]
        }
    },
    "required_packages": ["wallet", "stock"]
}"#;

/// Two automatons waiting on each other.
pub const CYCLIC: &str = r#"{
    "name": "Deadlock",
    "automatons": {
        "Left": {
            "states": ["a", "b"],
            "transitions": [
                {"source": "a", "destination": "b", "trigger": "go",
                 "conditions": ["automata__Right__is_completed"]}
            ]
        },
        "Right": {
            "states": ["a", "b"],
            "transitions": [
                {"source": "a", "destination": "b", "trigger": "go",
                 "conditions": ["automata__Left__is_completed"]}
            ]
        }
    },
    "required_packages": []
}"#;

pub const WALLET: &str = r#"{
    "id": "wallet",
    "label": "Wallet",
    "functions": {
        "funded": {
            "code": "function package__wallet__funded() public view returns (bool) { return balance > 0; }",
            "default": false
        },
        "deposit": {
            "code": "function deposit(uint256 amount) public { balance += amount; }",
            "default": true,
            "label": "Deposit"
        }
    },
    "structs": [],
    "variables": [
        {"name": "balance", "code": "uint256 public balance;"}
    ]
}"#;

pub const STOCK: &str = r#"{
    "id": "stock",
    "functions": {
        "available": {
            "code": "function package__stock__available() public view returns (bool) { return items > 0; }",
            "default": false
        }
    },
    "structs": [
        {"name": "Item", "code": "struct Item { string sku; uint32 quantity; }"}
    ],
    "variables": [
        {"name": "items", "code": "uint32 public items;"}
    ]
}"#;

/// Parses one of the specification constants.
pub fn specification(text: &str) -> Result<Specification, SpecificationError> {
    Specification::from_json_str(text)
}

/// Packages required by [`SHOP`].
pub fn shop_packages() -> Result<PackageSet, SpecificationError> {
    PackageSet::from_packages([Package::from_json_str(WALLET)?, Package::from_json_str(STOCK)?])
}
