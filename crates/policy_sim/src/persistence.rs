//! Extension-map persistence for engine resources.
//!
//! A resource that should survive a save/load cycle implements [`Saveable`]
//! and is registered with the [`SaveableRegistry`] by its plugin. A saved
//! session is an [`Extensions`] map from `SAVE_KEY` to `bitcode` bytes. The
//! engine never touches disk: callers decide where the map goes.

use std::collections::BTreeMap;

use bevy::prelude::*;

/// Saved session: one entry per non-skipped saveable resource.
pub type Extensions = BTreeMap<String, Vec<u8>>;

/// A resource persisted through the extension map.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Key in the extension map. Never change it for an existing resource,
    /// or older sessions stop restoring.
    const SAVE_KEY: &'static str;

    /// Encode this resource, or `None` to leave it out of the map.
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    /// Decode a resource. Must not fail: fall back to `Default` instead.
    fn load_from_bytes(bytes: &[u8]) -> Self;
}

/// `bitcode::decode` that logs and returns `T::default()` on bad input.
pub fn decode_or_warn<T: bitcode::DecodeOwned + Default>(key: &str, bytes: &[u8]) -> T {
    bitcode::decode(bytes).unwrap_or_else(|e| {
        warn!(
            "Saveable {}: cannot decode {} bytes ({}), using default",
            key,
            bytes.len(),
            e
        );
        T::default()
    })
}

/// Monomorphized save/load/reset entry points for one resource type.
#[derive(Clone, Copy)]
struct ResourceCodec {
    save: fn(&World) -> Option<Vec<u8>>,
    load: fn(&mut World, &[u8]),
    reset: fn(&mut World),
}

impl ResourceCodec {
    fn of<T: Saveable>() -> Self {
        Self {
            save: |world| world.get_resource::<T>()?.save_to_bytes(),
            load: |world, bytes| world.insert_resource(T::load_from_bytes(bytes)),
            reset: |world| world.insert_resource(T::default()),
        }
    }
}

/// Every registered saveable, keyed (and therefore ordered) by `SAVE_KEY`.
#[derive(Resource, Default, Clone)]
pub struct SaveableRegistry {
    codecs: BTreeMap<&'static str, ResourceCodec>,
}

impl SaveableRegistry {
    /// Register `T`. A second registration under the same key is ignored,
    /// and panics in debug builds.
    pub fn register<T: Saveable>(&mut self) {
        if self.codecs.contains_key(T::SAVE_KEY) {
            warn!(
                "SaveableRegistry: duplicate key '{}', keeping the first registration",
                T::SAVE_KEY
            );
            debug_assert!(false, "SaveableRegistry: duplicate key '{}'", T::SAVE_KEY);
            return;
        }
        self.codecs.insert(T::SAVE_KEY, ResourceCodec::of::<T>());
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.codecs.keys().copied()
    }

    pub fn save_all(&self, world: &World) -> Extensions {
        self.codecs
            .iter()
            .filter_map(|(key, codec)| (codec.save)(world).map(|bytes| (key.to_string(), bytes)))
            .collect()
    }

    /// Restore every registered resource present in `extensions`. Absent
    /// resources keep their current value; unknown keys are skipped.
    pub fn load_all(&self, world: &mut World, extensions: &Extensions) {
        for key in extensions.keys() {
            if !self.codecs.contains_key(key.as_str()) {
                debug!("SaveableRegistry: skipping unknown key '{}'", key);
            }
        }
        for (key, codec) in &self.codecs {
            if let Some(bytes) = extensions.get(*key) {
                (codec.load)(world, bytes);
            }
        }
    }

    pub fn reset_all(&self, world: &mut World) {
        for codec in self.codecs.values() {
            (codec.reset)(world);
        }
    }
}

/// Save every resource registered in `world`'s [`SaveableRegistry`].
///
/// Returns an empty map when no registry has been inserted.
pub fn save_world(world: &World) -> Extensions {
    world
        .get_resource::<SaveableRegistry>()
        .map(|registry| registry.save_all(world))
        .unwrap_or_default()
}

/// Restore registered resources from `extensions`.
pub fn load_world(world: &mut World, extensions: &Extensions) {
    let Some(registry) = world.get_resource::<SaveableRegistry>().cloned() else {
        warn!("load_world: no SaveableRegistry, nothing restored");
        return;
    };
    registry.load_all(world, extensions);
}

/// Reset every registered resource to its default.
pub fn reset_world(world: &mut World) {
    if let Some(registry) = world.get_resource::<SaveableRegistry>().cloned() {
        registry.reset_all(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default, Debug, PartialEq)]
    struct Counter {
        value: u32,
    }

    impl Saveable for Counter {
        const SAVE_KEY: &'static str = "counter";

        fn save_to_bytes(&self) -> Option<Vec<u8>> {
            (self.value != 0).then(|| bitcode::encode(&self.value))
        }

        fn load_from_bytes(bytes: &[u8]) -> Self {
            Counter {
                value: decode_or_warn(Self::SAVE_KEY, bytes),
            }
        }
    }

    fn registry() -> SaveableRegistry {
        let mut registry = SaveableRegistry::default();
        registry.register::<Counter>();
        registry
    }

    fn world_with(value: u32) -> World {
        let mut world = World::new();
        world.insert_resource(Counter { value });
        world
    }

    #[test]
    fn test_save_then_load_restores_value() {
        let mut world = world_with(42);
        let extensions = registry().save_all(&world);
        assert_eq!(extensions.len(), 1);

        world.insert_resource(Counter::default());
        registry().load_all(&mut world, &extensions);
        assert_eq!(world.resource::<Counter>().value, 42);
    }

    #[test]
    fn test_default_value_is_skipped() {
        assert!(registry().save_all(&world_with(0)).is_empty());
    }

    #[test]
    fn test_reset_all_restores_default() {
        let mut world = world_with(999);
        registry().reset_all(&mut world);
        assert_eq!(world.resource::<Counter>().value, 0);
    }

    #[test]
    fn test_unknown_and_absent_keys_leave_values() {
        let mut world = world_with(5);
        let mut extensions = Extensions::new();
        extensions.insert("something_else".to_string(), vec![0xFF, 0xFF]);
        registry().load_all(&mut world, &extensions);
        assert_eq!(world.resource::<Counter>().value, 5);
    }

    #[test]
    fn test_corrupt_bytes_load_default() {
        let mut world = world_with(5);
        let mut extensions = Extensions::new();
        extensions.insert("counter".to_string(), Vec::new());
        registry().load_all(&mut world, &extensions);
        assert_eq!(world.resource::<Counter>().value, 0);
    }

    #[test]
    fn test_world_helpers_use_inserted_registry() {
        let mut world = world_with(7);
        world.insert_resource(registry());

        let extensions = save_world(&world);
        reset_world(&mut world);
        assert_eq!(world.resource::<Counter>().value, 0);

        load_world(&mut world, &extensions);
        assert_eq!(world.resource::<Counter>().value, 7);
    }

    #[test]
    fn test_world_helpers_without_registry() {
        let mut world = world_with(3);
        assert!(save_world(&world).is_empty());
        reset_world(&mut world);
        assert_eq!(world.resource::<Counter>().value, 3);
    }

    #[test]
    #[should_panic(expected = "duplicate key")]
    fn test_duplicate_key_panics_in_debug() {
        let mut registry = registry();
        registry.register::<Counter>();
    }
}
