/// Identifiers offered by the asset selector when no catalog file is present.
pub const DEFAULT_ASSETS: &[&str] = &[
    "Mutant Right Turn 45",
    "Sword And Shield Crouch Block Idle",
    "Mutant Flexing Muscles",
    "Dodging Right",
    "Running",
    "Walking",
    "Stop Walking",
];

/// Asset loaded at startup.
pub const DEFAULT_ASSET: &str = "Mutant Right Turn 45";

/// `{id}` is replaced by the asset identifier.
pub const MODEL_PATH_TEMPLATE: &str = "models/gltf/{id}.glb";

/// Placeholder substituted in `MODEL_PATH_TEMPLATE`.
pub const MODEL_PATH_PLACEHOLDER: &str = "{id}";

/// Catalog file, relative to the asset root.
pub const CATALOG_PATH: &str = "catalog.json";
