//! Money.

use std::cell::RefCell;
use std::path::PathBuf;

use tessera_gui::{KvStore, StoreError};
use tessera_primitives::ActorId;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EconomyError {
	#[error("insufficient funds: have {balance:.2}, need {needed:.2}")]
	InsufficientFunds { balance: f64, needed: f64 },
	#[error("invalid amount {0}")]
	InvalidAmount(f64),
}

/// Balance bookkeeping the shop settles transactions against.
pub trait Economy {
	fn balance(&self, actor: ActorId) -> f64;

	fn deposit(&self, actor: ActorId, amount: f64) -> Result<f64, EconomyError>;

	/// Takes `amount` from the actor, failing without change when the balance is short.
	fn withdraw(&self, actor: ActorId, amount: f64) -> Result<f64, EconomyError>;

	fn load(&self) -> Result<(), StoreError> {
		Ok(())
	}

	fn save(&self) -> Result<(), StoreError> {
		Ok(())
	}
}

/// An [`Economy`] kept in a [`KvStore`] under `balances.<actor>`.
#[derive(Debug)]
pub struct LedgerEconomy {
	store: RefCell<KvStore>,
	starting_balance: f64,
}

impl LedgerEconomy {
	pub fn new(path: impl Into<PathBuf>, starting_balance: f64) -> Self {
		Self {
			store: RefCell::new(KvStore::new(path)),
			starting_balance,
		}
	}

	/// Actors with a recorded balance.
	pub fn accounts(&self) -> Vec<String> {
		self.store.borrow().keys("balances")
	}

	fn key(actor: ActorId) -> String {
		format!("balances.{actor}")
	}

	fn set(&self, actor: ActorId, balance: f64) {
		self.store.borrow_mut().set(&Self::key(actor), balance);
	}
}

fn checked(amount: f64) -> Result<f64, EconomyError> {
	if amount.is_finite() && amount >= 0.0 {
		Ok(amount)
	} else {
		Err(EconomyError::InvalidAmount(amount))
	}
}

impl Economy for LedgerEconomy {
	fn balance(&self, actor: ActorId) -> f64 {
		self.store.borrow().get_f64(&Self::key(actor)).unwrap_or(self.starting_balance)
	}

	fn deposit(&self, actor: ActorId, amount: f64) -> Result<f64, EconomyError> {
		let balance = self.balance(actor) + checked(amount)?;
		self.set(actor, balance);
		debug!(actor = %actor, amount, balance, "deposit");
		Ok(balance)
	}

	fn withdraw(&self, actor: ActorId, amount: f64) -> Result<f64, EconomyError> {
		let amount = checked(amount)?;
		let balance = self.balance(actor);
		if balance < amount {
			return Err(EconomyError::InsufficientFunds { balance, needed: amount });
		}
		self.set(actor, balance - amount);
		debug!(actor = %actor, amount, balance = balance - amount, "withdraw");
		Ok(balance - amount)
	}

	fn load(&self) -> Result<(), StoreError> {
		self.store.borrow_mut().load()
	}

	fn save(&self) -> Result<(), StoreError> {
		self.store.borrow().save()
	}
}
