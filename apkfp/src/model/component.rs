use serde::{Deserialize, Serialize};

use crate::hash::{HashAccumulator, StableHash};

/// A named entry declared in the manifest (activity, service, provider,
/// receiver) or a used feature.
///
/// The stable hash of a component covers all of its fields, the name is what
/// gets exported alongside it.
pub trait Component: StableHash {
    fn name(&self) -> &str;
}

impl<T: Component + ?Sized> Component for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Project components to their names, keeping the given order
pub fn component_names<C: Component>(components: &[C]) -> Vec<String> {
    components.iter().map(|it| String::from(it.name())).collect()
}

macro_rules! def_component {
    ($(#[$meta:meta])* $name:ident { $($(#[$fmeta:meta])* $field:ident : $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub name: String,
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl Component for $name {
            fn name(&self) -> &str {
                &self.name
            }
        }

        // Fields are hashed in declaration order
        impl StableHash for $name {
            fn stable_hash(&self) -> i32 {
                HashAccumulator::new()
                    .push(&self.name)
                    $(.push(&self.$field))*
                    .finish()
            }
        }
    };
}

def_component!(
    /// `<activity>` or `<activity-alias>`
    ActivityData {
        package_name: Option<String>,
        label: Option<String>,
        /// Set for aliases only
        target_name: Option<String>,
        permission: Option<String>,
        parent_name: Option<String>,
        #[serde(default)]
        exported: bool,
    }
);

def_component!(
    ServiceData {
        permission: Option<String>,
        #[serde(default)]
        exported: bool,
        #[serde(default)]
        isolated_process: bool,
        #[serde(default)]
        single_user: bool,
        #[serde(default)]
        external_service: bool,
        #[serde(default)]
        stop_with_task: bool,
    }
);

def_component!(
    ContentProviderData {
        authority: Option<String>,
        read_permission: Option<String>,
        write_permission: Option<String>,
        #[serde(default)]
        exported: bool,
        #[serde(default)]
        grant_uri_permissions: bool,
    }
);

def_component!(
    BroadcastReceiverData {
        permission: Option<String>,
        #[serde(default)]
        exported: bool,
    }
);

def_component!(
    /// `<uses-feature>`
    FeatureData {
        #[serde(default)]
        required: bool,
    }
);

impl ActivityData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_name: None,
            label: None,
            target_name: None,
            permission: None,
            parent_name: None,
            exported: false,
        }
    }

    pub fn is_alias(&self) -> bool {
        self.target_name.is_some()
    }
}

impl ServiceData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permission: None,
            exported: false,
            isolated_process: false,
            single_user: false,
            external_service: false,
            stop_with_task: false,
        }
    }
}

impl ContentProviderData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            authority: None,
            read_permission: None,
            write_permission: None,
            exported: false,
            grant_uri_permissions: false,
        }
    }
}

impl BroadcastReceiverData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permission: None,
            exported: false,
        }
    }
}

impl FeatureData {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
        }
    }
}
