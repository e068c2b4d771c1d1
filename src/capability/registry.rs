//! Process-wide registries: declarations by name, claim lists by type.
//!
//! Both follow an init-once-then-freeze discipline: populate them during
//! startup (trait declaration, implementation binding), then treat them as
//! read-only. Reads are lock-guarded so late binding is still safe, but
//! nothing in the crate mutates an entry after it is registered.

use std::any::TypeId;
use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Deserialize;

use crate::capability::declaration::CapabilityDecl;
use crate::errors::CapabilityError;

/// Registry of capability declarations, indexed by capability name.
///
/// Declarations can be registered programmatically or loaded from YAML files
/// (a single `trait:` entry or a `traits:` list per file).
#[derive(Debug, Default)]
pub struct TraitRegistry {
    declarations: HashMap<String, CapabilityDecl>,
}

impl TraitRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration. Replacing an existing name is logged and
    /// honored; declarations are expected to be registered once.
    pub fn register(&mut self, decl: CapabilityDecl) {
        if self.declarations.contains_key(&decl.name) {
            log::warn!("capability declaration replaced: {}", decl.name);
        }
        self.declarations.insert(decl.name.clone(), decl);
    }

    /// Look up a declaration by name.
    pub fn lookup(&self, name: &str) -> Option<&CapabilityDecl> {
        self.declarations.get(name)
    }

    /// Register declarations from a YAML file containing either a single
    /// `trait:` entry or a `traits:` list. Returns the number registered.
    pub fn register_from_file(&mut self, path: &str) -> Result<usize, CapabilityError> {
        let content = std::fs::read_to_string(path)?;

        if let Ok(decl) = CapabilityDecl::from_yaml(&content) {
            self.register(decl);
            return Ok(1);
        }

        let list: TraitListWrapper = serde_yaml::from_str(&content)?;
        let count = list.traits.len();
        for decl in list.traits {
            decl.validate()?;
            self.register(decl);
        }
        Ok(count)
    }

    /// Load every `.yaml`/`.yml` file under a directory (recursive).
    /// Unparseable files are skipped with a warning.
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize, CapabilityError> {
        let mut count = 0;
        if !dir.exists() {
            return Ok(0);
        }

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                count += self.load_directory(&path)?;
            } else if path
                .extension()
                .map_or(false, |ext| ext == "yaml" || ext == "yml")
            {
                match self.register_from_file(path.to_str().unwrap_or_default()) {
                    Ok(n) => count += n,
                    Err(e) => {
                        log::warn!(
                            "failed to load capability declaration from {}: {}",
                            path.display(),
                            e
                        );
                    }
                }
            }
        }

        Ok(count)
    }

    /// Number of registered declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Wrapper for YAML files carrying a `traits:` list.
#[derive(Debug, Deserialize)]
struct TraitListWrapper {
    traits: Vec<CapabilityDecl>,
}

// ---------------------------------------------------------------------------
// Global declaration registry
// ---------------------------------------------------------------------------

static DECLARATIONS: Lazy<RwLock<TraitRegistry>> =
    Lazy::new(|| RwLock::new(TraitRegistry::new()));

/// Register a capability declaration in the global registry and hand it back
/// for local use.
pub fn declare_trait(decl: CapabilityDecl) -> CapabilityDecl {
    DECLARATIONS.write().register(decl.clone());
    decl
}

/// Look up a globally registered declaration by name.
pub fn lookup(name: &str) -> Option<CapabilityDecl> {
    DECLARATIONS.read().lookup(name).cloned()
}

/// Load declaration YAML files from a directory into the global registry.
pub fn load_declarations(dir: &Path) -> Result<usize, CapabilityError> {
    DECLARATIONS.write().load_directory(dir)
}

// ---------------------------------------------------------------------------
// Claim registry: type -> ordered claim list
// ---------------------------------------------------------------------------

static CLAIMS: Lazy<RwLock<HashMap<TypeId, Vec<CapabilityDecl>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Attach an ordered claim list to a concrete type.
///
/// Pure metadata: no verification happens here. Verification runs when a
/// `Verified<T>` is constructed. A single declaration binds as a one-element
/// list. Binding a type that already has a claim list is an error; claims
/// are immutable once recorded.
pub fn bind_implementation<T: 'static>(
    capabilities: impl IntoIterator<Item = CapabilityDecl>,
) -> Result<(), CapabilityError> {
    let mut claims = CLAIMS.write();
    if claims.contains_key(&TypeId::of::<T>()) {
        return Err(CapabilityError::ClaimAlreadyBound {
            type_name: std::any::type_name::<T>().to_string(),
        });
    }
    claims.insert(TypeId::of::<T>(), capabilities.into_iter().collect());
    Ok(())
}

/// The claim list bound to a type, in binding order. Empty if none was bound.
pub fn claimed<T: 'static>() -> Vec<CapabilityDecl> {
    CLAIMS
        .read()
        .get(&TypeId::of::<T>())
        .cloned()
        .unwrap_or_default()
}
