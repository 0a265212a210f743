//! Subcommands and their JSON output.

use clap::Subcommand;
use serde::Serialize;
use splitz_runtime::{Runtime, SplitEvent};
use splitz_types::{AccountId, AssetId, ContractId, TypeError};

/// Accept either a plain account name or a contract address. Addresses are
/// normalised so that funds sent to them land in the contract's custody.
pub fn parse_account(raw: &str) -> Result<AccountId, TypeError> {
    match raw.parse::<ContractId>() {
        Ok(id) => Ok(id.account()),
        Err(_) => raw.parse(),
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a distribution instance through the factory.
    Create {
        /// Payee accounts, comma-separated, in registration order.
        #[arg(long, value_delimiter = ',', required = true, value_parser = parse_account)]
        payees: Vec<AccountId>,
        /// Shares, comma-separated, aligned with `--payees`.
        #[arg(long, value_delimiter = ',', required = true)]
        shares: Vec<u128>,
    },

    /// Deploy a pull-payment store.
    DeployStore,

    /// Create funds in an account (local harness only).
    Mint {
        #[arg(long, value_parser = parse_account)]
        to: AccountId,
        #[arg(long, default_value = "native")]
        asset: AssetId,
        #[arg(long)]
        amount: u128,
    },

    /// Transfer funds; sending to an instance address funds the distribution.
    Send {
        #[arg(long, value_parser = parse_account)]
        from: AccountId,
        #[arg(long, value_parser = parse_account)]
        to: AccountId,
        #[arg(long, default_value = "native")]
        asset: AssetId,
        #[arg(long)]
        amount: u128,
    },

    /// Escrow native funds in a store for a beneficiary.
    Deposit {
        #[arg(long)]
        store: ContractId,
        #[arg(long, value_parser = parse_account)]
        from: AccountId,
        #[arg(long, value_parser = parse_account)]
        beneficiary: AccountId,
        #[arg(long)]
        amount: u128,
    },

    /// Pay out a beneficiary's escrowed balance.
    WithdrawPayments {
        #[arg(long)]
        store: ContractId,
        #[arg(long, value_parser = parse_account)]
        beneficiary: AccountId,
    },

    /// Have an instance pull its escrowed balance from a store.
    Pull {
        #[arg(long)]
        instance: ContractId,
        #[arg(long)]
        store: ContractId,
    },

    /// Release what a payee is owed.
    Release {
        #[arg(long)]
        instance: ContractId,
        #[arg(long, value_parser = parse_account)]
        payee: AccountId,
        #[arg(long, default_value = "native")]
        asset: AssetId,
    },

    /// Show an account balance.
    Balance {
        #[arg(long, value_parser = parse_account)]
        account: AccountId,
        #[arg(long, default_value = "native")]
        asset: AssetId,
    },

    /// Show an instance's payees, shares and per-asset accounting.
    Show {
        #[arg(long)]
        instance: ContractId,
        #[arg(long, default_value = "native")]
        asset: AssetId,
    },

    /// List committed records, oldest first.
    Events,
}

impl Command {
    /// Whether the command can change state and the snapshot must be saved.
    pub fn mutates(&self) -> bool {
        !matches!(
            self,
            Self::Balance { .. } | Self::Show { .. } | Self::Events
        )
    }
}

#[derive(Serialize)]
struct Created {
    instance: ContractId,
}

#[derive(Serialize)]
struct Deployed {
    store: ContractId,
}

#[derive(Serialize)]
struct Amount {
    amount: u128,
}

#[derive(Serialize)]
struct Balance {
    account: AccountId,
    asset: String,
    balance: u128,
}

#[derive(Serialize)]
struct PayeeView {
    account: AccountId,
    share: u128,
    released: u128,
    available: u128,
}

#[derive(Serialize)]
struct InstanceView {
    instance: ContractId,
    asset: String,
    total_shares: u128,
    custody: u128,
    total_released: u128,
    payees: Vec<PayeeView>,
}

/// Execute `command` against `runtime` and render the result as JSON.
pub fn run(runtime: &mut Runtime, command: Command) -> anyhow::Result<String> {
    let out = match command {
        Command::Create { payees, shares } => to_json(&Created {
            instance: runtime.create_instance(payees, shares)?,
        })?,
        Command::DeployStore => to_json(&Deployed {
            store: runtime.deploy_store()?,
        })?,
        Command::Mint { to, asset, amount } => {
            runtime.mint(&to, &asset, amount)?;
            balance(runtime, to, &asset)?
        }
        Command::Send {
            from,
            to,
            asset,
            amount,
        } => {
            runtime.transfer(&from, &to, &asset, amount)?;
            to_json(&Amount { amount })?
        }
        Command::Deposit {
            store,
            from,
            beneficiary,
            amount,
        } => {
            runtime.deposit(store, &from, &beneficiary, amount)?;
            to_json(&Amount {
                amount: runtime.payments(&store, &beneficiary)?,
            })?
        }
        Command::WithdrawPayments { store, beneficiary } => to_json(&Amount {
            amount: runtime.withdraw_payments(store, &beneficiary)?,
        })?,
        Command::Pull { instance, store } => to_json(&Amount {
            amount: runtime.withdraw_from_contract(instance, store)?,
        })?,
        Command::Release {
            instance,
            payee,
            asset,
        } => to_json(&Amount {
            amount: runtime.release(instance, &payee, &asset)?,
        })?,
        Command::Balance { account, asset } => balance(runtime, account, &asset)?,
        Command::Show { instance, asset } => to_json(&show(runtime, instance, &asset)?)?,
        Command::Events => to_json::<[SplitEvent]>(runtime.events())?,
    };
    Ok(out)
}

fn balance(runtime: &Runtime, account: AccountId, asset: &AssetId) -> anyhow::Result<String> {
    to_json(&Balance {
        balance: runtime.balance_of(&account, asset),
        account,
        asset: asset.to_string(),
    })
}

fn show(runtime: &Runtime, instance: ContractId, asset: &AssetId) -> anyhow::Result<InstanceView> {
    let payees = runtime
        .payees(&instance)?
        .into_iter()
        .map(|p| {
            Ok(PayeeView {
                released: runtime.released(&instance, &p.account, asset)?,
                available: runtime.available(&instance, &p.account, asset)?,
                account: p.account,
                share: p.share,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(InstanceView {
        instance,
        asset: asset.to_string(),
        total_shares: runtime.total_shares(&instance)?,
        custody: runtime.custody_balance(&instance, asset)?,
        total_released: runtime.total_released(&instance, asset)?,
        payees,
    })
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
