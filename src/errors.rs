use schema::Context;
use std::fmt;

/// Main error type for the Pokemon gacha engine
#[derive(Debug, Clone, PartialEq)]
pub enum GachaError {
    /// The static tables were rejected while being built
    Catalog(CatalogError),
    /// A machine could not be spun because its data is broken
    Roll(RollError),
    /// Pull counters were given an invalid update
    Ledger(LedgerError),
    /// A purchase could not go ahead
    Session(SessionError),
    /// Reading or writing a file failed
    Data(DataError),
}

/// Errors raised while building a RarityTable or EntityCatalog
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A table was given no rows
    EmptyTable(&'static str),
    /// Two rarities share a name
    DuplicateRarity(String),
    /// Two entities share an id
    DuplicateEntity(String),
    /// An entity names a rarity the table does not define
    UnknownRarity { entity: String, rarity: String },
    /// An entity weight is negative, NaN or infinite
    InvalidWeight {
        entity: String,
        context: Context,
        weight: f64,
    },
    /// An entity value is negative, NaN or infinite
    InvalidValue { entity: String, value: f64 },
    /// Two machines are configured for the same context
    DuplicateMachine(Context),
}

/// Configuration errors surfaced when a context is rolled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    /// Every rarity has weight 0 in this context
    NoRarityWeight { context: Context },
    /// The drawn rarity has no entity with nonzero weight in this context
    NoEligibleEntity { rarity: String, context: Context },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Pulls are recorded in batches of at least one
    ZeroPullCount { context: Context },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No machine is configured for this context
    UnknownMachine(Context),
    /// The player cannot pay for the pull
    InsufficientGold { needed: u64, available: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    Io { path: String, message: String },
    Parse { path: String, message: String },
    Serialize { message: String },
}

impl fmt::Display for GachaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GachaError::Catalog(err) => write!(f, "Catalog error: {}", err),
            GachaError::Roll(err) => write!(f, "Roll error: {}", err),
            GachaError::Ledger(err) => write!(f, "Ledger error: {}", err),
            GachaError::Session(err) => write!(f, "Session error: {}", err),
            GachaError::Data(err) => write!(f, "Data error: {}", err),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::EmptyTable(table) => write!(f, "No {} defined", table),
            CatalogError::DuplicateRarity(name) => write!(f, "Duplicate rarity: {}", name),
            CatalogError::DuplicateEntity(id) => write!(f, "Duplicate entity id: {}", id),
            CatalogError::UnknownRarity { entity, rarity } => {
                write!(f, "Entity {} has unknown rarity '{}'", entity, rarity)
            }
            CatalogError::InvalidWeight {
                entity,
                context,
                weight,
            } => write!(
                f,
                "Entity {} has invalid weight {} for {}",
                entity, weight, context
            ),
            CatalogError::InvalidValue { entity, value } => {
                write!(f, "Entity {} has invalid value {}", entity, value)
            }
            CatalogError::DuplicateMachine(context) => {
                write!(f, "Duplicate machine for context '{}'", context)
            }
        }
    }
}

impl fmt::Display for RollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollError::NoRarityWeight { context } => {
                write!(f, "No rarity has weight in context '{}'", context)
            }
            RollError::NoEligibleEntity { rarity, context } => write!(
                f,
                "No eligible entity for rarity '{}' in context '{}'",
                rarity, context
            ),
        }
    }
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::ZeroPullCount { context } => {
                write!(f, "Cannot record zero pulls for {}", context)
            }
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnknownMachine(context) => {
                write!(f, "No machine configured for {}", context)
            }
            SessionError::InsufficientGold { needed, available } => write!(
                f,
                "Not enough Pokedollars: need {}, have {}",
                needed, available
            ),
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io { path, message } => write!(f, "Could not access {}: {}", path, message),
            DataError::Parse { path, message } => write!(f, "Could not parse {}: {}", path, message),
            DataError::Serialize { message } => write!(f, "Could not serialize: {}", message),
        }
    }
}

impl std::error::Error for GachaError {}
impl std::error::Error for CatalogError {}
impl std::error::Error for RollError {}
impl std::error::Error for LedgerError {}
impl std::error::Error for SessionError {}
impl std::error::Error for DataError {}

impl From<CatalogError> for GachaError {
    fn from(err: CatalogError) -> Self {
        GachaError::Catalog(err)
    }
}

impl From<RollError> for GachaError {
    fn from(err: RollError) -> Self {
        GachaError::Roll(err)
    }
}

impl From<LedgerError> for GachaError {
    fn from(err: LedgerError) -> Self {
        GachaError::Ledger(err)
    }
}

impl From<SessionError> for GachaError {
    fn from(err: SessionError) -> Self {
        GachaError::Session(err)
    }
}

impl From<DataError> for GachaError {
    fn from(err: DataError) -> Self {
        GachaError::Data(err)
    }
}

/// Type alias for Results using GachaError
pub type GachaResult<T> = Result<T, GachaError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Type alias for Results using RollError
pub type RollResult<T> = Result<T, RollError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;
