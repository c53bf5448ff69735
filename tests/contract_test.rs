use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use supply_guard::contract::{
    CallRequest, ContractError, ContractFactory, ContractInterface, TxHash, WalletError,
    WalletProvider, SUPPLY_GUARD_ADDRESS,
};
use supply_guard::model::Address;
use supply_guard::network::NetworkTable;

const ARTIFACT: &str = r#"{
    "contractName": "SupplyGuard",
    "abi": [
        {"type": "function", "name": "getProduct", "stateMutability": "view",
         "inputs": [{"name": "sku", "type": "string"}],
         "outputs": [{"name": "", "type": "uint256"}]},
        {"type": "function", "name": "addProduct", "stateMutability": "nonpayable",
         "inputs": [{"name": "sku", "type": "string"}, {"name": "quantity", "type": "uint256"}],
         "outputs": []}
    ]
}"#;

/// Records every request and answers from fixed values.
struct FakeWallet {
    account: Option<Address>,
    chain_id: u64,
    fail_with: Option<WalletError>,
    calls: Mutex<Vec<CallRequest>>,
    sent: Mutex<Vec<CallRequest>>,
}

impl FakeWallet {
    fn connected(account: Address) -> Self {
        Self {
            account: Some(account),
            chain_id: 4202,
            fail_with: None,
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    fn selected_account(&self) -> Option<Address> {
        self.account
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        Ok(self.chain_id)
    }

    async fn call(&self, request: CallRequest) -> Result<Value, WalletError> {
        if let Some(e) = &self.fail_with {
            return Err(e.clone());
        }
        self.calls.lock().unwrap().push(request);
        Ok(json!(54))
    }

    async fn send_transaction(&self, request: CallRequest) -> Result<TxHash, WalletError> {
        if let Some(e) = &self.fail_with {
            return Err(e.clone());
        }
        self.sent.lock().unwrap().push(request);
        Ok(TxHash("0xabc".to_string()))
    }
}

fn account() -> Address {
    "0x00000000000000000000000000000000000000a1".parse().unwrap()
}

fn factory() -> ContractFactory {
    ContractFactory::supply_guard(ContractInterface::from_artifact_json(ARTIFACT).unwrap()).unwrap()
}

#[test]
fn test_binding_without_wallet_returns_none() {
    assert!(factory().bind(None).is_none());
}

#[test]
fn test_binding_without_selected_account_returns_none() {
    let wallet = FakeWallet {
        account: None,
        ..FakeWallet::connected(account())
    };
    assert!(factory().bind(Some(Arc::new(wallet))).is_none());
}

#[tokio::test]
async fn test_bound_handle_reads_and_writes_through_wallet() {
    let wallet = Arc::new(FakeWallet::connected(account()));
    let handle = factory().bind(Some(wallet.clone())).expect("handle expected");

    assert_eq!(handle.address(), SUPPLY_GUARD_ADDRESS.parse::<Address>().unwrap());
    assert_eq!(handle.account(), account());
    assert_eq!(handle.interface().name(), "SupplyGuard");

    let stock = handle.read("getProduct", vec![json!("W754SG24")]).await.unwrap();
    assert_eq!(stock, json!(54));

    let hash = handle
        .write("addProduct", vec![json!("W754SG24"), json!(54)])
        .await
        .unwrap();
    assert_eq!(hash.to_string(), "0xabc");

    let calls = wallet.calls.lock().unwrap();
    assert_eq!(calls[0].function, "getProduct(string)");
    assert_eq!(calls[0].from, account());
    let sent = wallet.sent.lock().unwrap();
    assert_eq!(sent[0].function, "addProduct(string,uint256)");
    assert_eq!(sent[0].to, handle.address());
}

#[tokio::test]
async fn test_bad_calls_never_reach_the_wallet() {
    let wallet = Arc::new(FakeWallet::connected(account()));
    let handle = factory().bind(Some(wallet.clone())).unwrap();

    let unknown = handle.read("burn", vec![]).await;
    assert!(matches!(unknown, Err(ContractError::UnknownFunction { .. })));

    let arity = handle.read("getProduct", vec![]).await;
    assert!(matches!(arity, Err(ContractError::ArgumentCount { expected: 1, given: 0, .. })));

    let read_a_write = handle.read("addProduct", vec![json!("X"), json!(1)]).await;
    assert!(matches!(read_a_write, Err(ContractError::NotReadOnly(_))));

    let write_a_read = handle.write("getProduct", vec![json!("X")]).await;
    assert!(matches!(write_a_read, Err(ContractError::ReadOnly(_))));

    assert!(wallet.calls.lock().unwrap().is_empty());
    assert!(wallet.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_wallet_failures_propagate() {
    let wallet = FakeWallet {
        fail_with: Some(WalletError::Rejected),
        ..FakeWallet::connected(account())
    };
    let handle = factory().bind(Some(Arc::new(wallet))).unwrap();

    let result = handle.write("addProduct", vec![json!("X"), json!(1)]).await;
    assert_eq!(result, Err(ContractError::Wallet(WalletError::Rejected)));
}

#[tokio::test]
async fn test_chain_id_resolves_in_network_table() {
    let wallet = Arc::new(FakeWallet::connected(account()));
    let handle = factory().bind(Some(wallet)).unwrap();

    let chain_id = handle.chain_id().await.unwrap();
    let table = NetworkTable::builtin().unwrap();
    let network = table.by_chain_id(chain_id).expect("known chain");
    assert_eq!(network.name, "hardhat");
}

#[tokio::test]
async fn test_overloaded_write_is_sent_to_the_named_signature() {
    let interface = ContractInterface::from_artifact_json(
        r#"{
            "contractName": "SupplyGuard",
            "abi": [
                {"type": "function", "name": "transfer", "stateMutability": "nonpayable",
                 "inputs": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint256"}]},
                {"type": "function", "name": "transfer", "stateMutability": "nonpayable",
                 "inputs": [{"name": "sku", "type": "bytes32"}, {"name": "amount", "type": "uint256"}]}
            ]
        }"#,
    )
    .unwrap();
    let wallet = Arc::new(FakeWallet::connected(account()));
    let handle = ContractFactory::supply_guard(interface)
        .unwrap()
        .bind(Some(wallet.clone()))
        .unwrap();
    let sku = json!(format!("0x{}", "ab".repeat(32)));

    let ambiguous = handle.write("transfer", vec![sku.clone(), json!(1)]).await;
    assert!(matches!(ambiguous, Err(ContractError::AmbiguousFunction { .. })));
    assert!(wallet.sent.lock().unwrap().is_empty());

    handle
        .write("transfer(bytes32,uint256)", vec![sku, json!(1)])
        .await
        .unwrap();
    let sent = wallet.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].function, "transfer(bytes32,uint256)");
}
