//! Adapter and builder tests

use super::*;
use crate::engine::{
    ActionResult, CancellationToken, ContentLocation, ContentReference, ItemPostPublishContext,
    ManifestEntry, MappingContext, MigrationItem, PublishedItem, ServiceMap, ServiceScope,
};
use crate::extensions::{
    ActionCompleted, ContentFilter, ContentMapping, ContentTransformer, FromServices,
};
use crate::services::ScopedServices;
use crate::wrappers::{ContentWrapper, UserContent, WrapperRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// === Fixture content types ===

#[derive(Debug, Clone, PartialEq)]
struct HostUser {
    name: String,
}

impl HostUser {
    fn named(name: &str) -> Self {
        Self { name: name.into() }
    }
}

struct User(HostUser);

impl ContentWrapper for User {
    type Host = HostUser;
    const CONTENT_NAME: &'static str = "user";

    fn wrap(host: HostUser) -> Self {
        Self(host)
    }
    fn into_host(self) -> HostUser {
        self.0
    }
    fn host(&self) -> &HostUser {
        &self.0
    }
}

impl UserContent for User {}

fn entry_for(name: &str) -> ManifestEntry {
    let location = ContentLocation::from_name(name);
    ManifestEntry::pending(ContentReference::new(name, location.clone()), location)
}

fn item(name: &str) -> MigrationItem<HostUser> {
    MigrationItem::new(HostUser::named(name), entry_for(name))
}

fn wrappers() -> Arc<WrapperRegistry> {
    let registry = WrapperRegistry::new();
    registry.register::<User>().unwrap();
    Arc::new(registry)
}

fn scope() -> Arc<dyn ServiceScope> {
    Arc::new(ServiceMap::new())
}

// === Fixture extensions ===

struct ExcludeTestUsers;

impl FromServices for ExcludeTestUsers {
    fn from_services(_services: &ScopedServices) -> Self {
        Self
    }
}

impl ContentFilter<User> for ExcludeTestUsers {
    fn filter(&self, items: Vec<MigrationItem<User>>) -> HookResult<Vec<MigrationItem<User>>> {
        Ok(items
            .into_iter()
            .filter(|i| i.item.host().name != "Test")
            .collect())
    }
}

struct SuffixMapping;

impl FromServices for SuffixMapping {
    fn from_services(_services: &ScopedServices) -> Self {
        Self
    }
}

impl ContentMapping<User> for SuffixMapping {
    fn map(&self, ctx: MappingContext<User>) -> HookResult<MappingContext<User>> {
        let renamed = ctx.mapped_location.rename(format!("{}2", ctx.mapped_location.name()));
        Ok(ctx.map_to(renamed))
    }
}

struct UppercaseTransformer;

impl FromServices for UppercaseTransformer {
    fn from_services(_services: &ScopedServices) -> Self {
        Self
    }
}

impl ContentTransformer<User> for UppercaseTransformer {
    fn transform(&self, item: User) -> HookResult<User> {
        let mut host = item.into_host();
        host.name = host.name.to_uppercase();
        Ok(User::wrap(host))
    }
}

// === Builder ordering and snapshots ===

#[test]
fn one_factory_per_add_in_registration_order() {
    let mut builder = FilterBuilder::new(wrappers());
    builder.add::<User, ExcludeTestUsers>();
    builder.add_fn::<User, _>(|items: Vec<MigrationItem<User>>| Ok(items));

    let collection = builder.build();
    let hooks = collection.get_hooks(&InterfaceId::filter::<User>());
    assert_eq!(hooks.len(), 2);
}

#[test]
fn clear_then_build_yields_no_factories() {
    let mut builder = FilterBuilder::new(wrappers());
    builder.add::<User, ExcludeTestUsers>();
    builder.clear();

    let collection = builder.build();
    assert!(collection.is_empty());
    assert!(collection.get_hooks(&InterfaceId::filter::<User>()).is_empty());
}

#[test]
fn built_snapshot_is_immune_to_later_mutation() {
    let mut builder = FilterBuilder::new(wrappers());
    builder.add::<User, ExcludeTestUsers>();
    let snapshot = builder.build();

    builder.add::<User, ExcludeTestUsers>();
    builder.clear();

    assert_eq!(snapshot.get_hooks(&InterfaceId::filter::<User>()).len(), 1);
}

#[test]
fn by_content_type_groups_registrations() {
    let mut builder = FilterBuilder::new(wrappers());
    builder.add::<User, ExcludeTestUsers>();
    builder.add::<User, ExcludeTestUsers>();

    let grouped = builder.by_content_type();
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped["user"].len(), 2);
}

// === Filter adapter ===

#[test]
fn filter_adapter_bridges_host_items() {
    let mut builder = FilterBuilder::new(wrappers());
    builder.add::<User, ExcludeTestUsers>();
    let collection = builder.build();

    let factory = &collection.get_hooks(&InterfaceId::filter::<User>())[0];
    let hook: BoxedFilterHook<HostUser> = factory.create_as(&scope()).unwrap();

    let kept = hook
        .execute(vec![item("Test"), item("A"), item("B")])
        .unwrap();
    let names: Vec<&str> = kept.iter().map(|i| i.item.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn one_and_two_argument_filter_callbacks_agree() {
    let mut builder = FilterBuilder::new(wrappers());
    builder.add_fn::<User, _>(|items: Vec<MigrationItem<User>>| {
        Ok(items.into_iter().filter(|i| i.item.host().name != "Test").collect())
    });
    builder.add_fn::<User, _>(|items: Vec<MigrationItem<User>>, _services: &ScopedServices| {
        Ok(items.into_iter().filter(|i| i.item.host().name != "Test").collect())
    });
    let collection = builder.build();
    let hooks = collection.get_hooks(&InterfaceId::filter::<User>());
    assert_eq!(hooks.len(), 2);

    for factory in hooks {
        let hook: BoxedFilterHook<HostUser> = factory.create_as(&scope()).unwrap();
        let kept = hook.execute(vec![item("Test"), item("A")]).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].item.name, "A");
    }
}

#[test]
fn user_errors_propagate_unmodified() {
    let mut builder = FilterBuilder::new(wrappers());
    builder.add_fn::<User, _>(|_items: Vec<MigrationItem<User>>| {
        Err(HookError::user("filter exploded"))
    });
    let collection = builder.build();

    let factory = &collection.get_hooks(&InterfaceId::filter::<User>())[0];
    let hook: BoxedFilterHook<HostUser> = factory.create_as(&scope()).unwrap();
    let err = hook.execute(vec![item("A")]).unwrap_err();
    assert_eq!(err.to_string(), "filter exploded");
}

// === Mapping adapters ===

#[test]
fn mapping_adapter_returns_new_context() {
    let mut builder = MappingBuilder::new(wrappers());
    builder.add::<User, SuffixMapping>();
    let collection = builder.build();

    let factory = &collection.get_hooks(&InterfaceId::mapping::<User>())[0];
    let hook: BoxedMappingHook<HostUser> = factory.create_as(&scope()).unwrap();

    let ctx = MappingContext::new(HostUser::named("alice"), ContentLocation::from_name("alice"));
    let original = ctx.clone();
    let mapped = tokio_test::block_on(hook.execute(ctx, &CancellationToken::new())).unwrap();

    assert_eq!(mapped.mapped_location.name(), "alice2");
    assert_eq!(original.mapped_location.name(), "alice");
}

#[test]
fn cloud_username_mapping_has_its_own_interface() {
    let mut builder = MappingBuilder::new(wrappers());
    builder.add_cloud_username::<User, SuffixMapping>();
    let collection = builder.build();

    assert!(collection.get_hooks(&InterfaceId::mapping::<User>()).is_empty());
    let hooks = collection.get_hooks(&InterfaceId::cloud_username_mapping::<User>());
    assert_eq!(hooks.len(), 1);

    let hook: BoxedMappingHook<HostUser> = hooks[0].create_as(&scope()).unwrap();
    let ctx = MappingContext::new(HostUser::named("bob"), ContentLocation::from_name("bob"));
    let mapped = tokio_test::block_on(hook.execute(ctx, &CancellationToken::new())).unwrap();
    assert_eq!(mapped.mapped_location.name(), "bob2");
}

// === Transformer adapter ===

#[tokio::test]
async fn transformer_adapter_replaces_item() {
    let mut builder = TransformerBuilder::new(wrappers());
    builder.add::<User, UppercaseTransformer>();
    let collection = builder.build();

    let factory = &collection.get_hooks(&InterfaceId::transformer::<User>())[0];
    let hook: BoxedTransformerHook<HostUser> = factory.create_as(&scope()).unwrap();

    let out = hook
        .execute(HostUser::named("quiet"), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(out.name, "QUIET");
}

#[tokio::test]
async fn cancellation_is_accepted_and_ignored() {
    let mut builder = TransformerBuilder::new(wrappers());
    builder.add_fn::<User, _>(|item: User| Ok(item));
    let collection = builder.build();

    let factory = &collection.get_hooks(&InterfaceId::transformer::<User>())[0];
    let hook: BoxedTransformerHook<HostUser> = factory.create_as(&scope()).unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();
    // Already-cancelled token: the adapter still completes normally.
    let out = hook.execute(HostUser::named("a"), &cancel).await.unwrap();
    assert_eq!(out.name, "a");
}

// === Post-publish adapters ===

#[test]
fn bulk_post_publish_observes_whole_batch() {
    let observed = Arc::new(AtomicUsize::new(0));
    let observed_in = observed.clone();

    let mut builder = PostPublishBuilder::new(wrappers());
    builder.add_bulk_fn::<User, _>(move |items: &[PublishedItem<User>]| {
        observed_in.fetch_add(items.len(), Ordering::Relaxed);
        Ok(())
    });
    let collection = builder.build();

    let factory = &collection.get_hooks(&InterfaceId::bulk_post_publish::<User>())[0];
    let hook: BoxedBulkPostPublishHook<HostUser> = factory.create_as(&scope()).unwrap();

    let destination = ContentReference::new("a", ContentLocation::from_name("a"));
    let published = vec![
        PublishedItem::new(HostUser::named("a"), destination.clone(), entry_for("a")),
        PublishedItem::new(HostUser::named("b"), destination, entry_for("b")),
    ];
    hook.execute(&published).unwrap();
    assert_eq!(observed.load(Ordering::Relaxed), 2);
}

#[test]
fn item_post_publish_sees_both_sides() {
    let mut builder = PostPublishBuilder::new(wrappers());
    builder.add_item_fn::<User, _>(|ctx: &ItemPostPublishContext<User>| {
        assert_eq!(ctx.published.host().name, "src");
        assert_eq!(ctx.destination.host().name, "dst");
        Ok(())
    });
    let collection = builder.build();

    let factory = &collection.get_hooks(&InterfaceId::item_post_publish::<User>())[0];
    let hook: BoxedItemPostPublishHook<HostUser> = factory.create_as(&scope()).unwrap();

    let ctx = ItemPostPublishContext::new(
        HostUser::named("src"),
        HostUser::named("dst"),
        entry_for("src"),
    );
    hook.execute(&ctx).unwrap();
}

// === Lifecycle adapters ===

struct RecordingHook {
    log: Arc<std::sync::Mutex<Vec<&'static str>>>,
    tag: &'static str,
}

impl ActionCompleted for RecordingHook {
    fn on_action_completed(&self, _result: &ActionResult) -> HookResult<()> {
        self.log.lock().unwrap().push(self.tag);
        Ok(())
    }
}

#[test]
fn lifecycle_hooks_fan_out_in_registration_order() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let (first, second) = (log.clone(), log.clone());

    let mut builder = LifecycleBuilder::new(wrappers());
    builder.add_action_completed_with(move |_services: &ScopedServices| RecordingHook {
        log: first.clone(),
        tag: "first",
    });
    builder.add_action_completed_with(move |_services: &ScopedServices| RecordingHook {
        log: second.clone(),
        tag: "second",
    });
    let collection = builder.build();

    let hooks = collection.get_hooks(&InterfaceId::action_completed());
    assert_eq!(hooks.len(), 2);

    let result = ActionResult::succeeded();
    for factory in hooks {
        let hook: BoxedActionCompletedHook = factory.create_as(&scope()).unwrap();
        hook.execute(&result).unwrap();
    }
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}

// === Factory type erasure ===

#[test]
fn create_as_wrong_interface_is_missing_entry_point() {
    let mut builder = FilterBuilder::new(wrappers());
    builder.add::<User, ExcludeTestUsers>();
    let collection = builder.build();

    let factory = &collection.get_hooks(&InterfaceId::filter::<User>())[0];
    let err = factory
        .create_as::<BoxedMappingHook<HostUser>>(&scope())
        .unwrap_err();

    match err {
        HookError::MissingEntryPoint { provided, .. } => {
            assert_eq!(provided, "filter<user>");
        }
        other => panic!("expected MissingEntryPoint, got {other}"),
    }
}

#[test]
fn each_create_yields_an_independent_adapter() {
    let constructions = Arc::new(AtomicUsize::new(0));
    let counter = constructions.clone();

    let mut builder = FilterBuilder::new(wrappers());
    builder.add_with::<User, _>(move |_services: &ScopedServices| {
        counter.fetch_add(1, Ordering::Relaxed);
        ExcludeTestUsers
    });
    let collection = builder.build();

    let factory = &collection.get_hooks(&InterfaceId::filter::<User>())[0];
    let _a: BoxedFilterHook<HostUser> = factory.create_as(&scope()).unwrap();
    let _b: BoxedFilterHook<HostUser> = factory.create_as(&scope()).unwrap();

    // One extension instance per scope: nothing shared, nothing reused.
    assert_eq!(constructions.load(Ordering::Relaxed), 2);
}
