#[cfg(test)]
mod tests {
    use std::fs;

    use gigbook::records::{
        BillingEntry, OnboardingDraft, OnboardingProfile, OrderCategory,
        RegistrationDraft, Role,
    };
    use gigbook::views::{DateRange, EarningsView, OrdersView, STATEMENT_FILE_NAME};
    use gigbook::{
        FolderSubstrate, RecordStore, SeedPolicy, StoreError, Substrate,
    };
    use tempdir::TempDir;

    fn open(dir: &TempDir) -> RecordStore<FolderSubstrate> {
        gigbook::initialize();
        let substrate =
            FolderSubstrate::new("test".to_owned(), dir.path()).expect("Failed to open folder");
        RecordStore::new(substrate)
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = TempDir::new("gigbook_session").expect("Failed to create temporary directory");

        let mut store = open(&dir).with_seed_policy(SeedPolicy::OnFirstRead);
        let id = store.ensure_user_id().unwrap();
        store.set_role(Role::Seller).unwrap();
        let orders = store.orders().unwrap();
        drop(store);

        let mut store = open(&dir);
        assert_eq!(store.ensure_user_id().unwrap(), id);
        assert_eq!(store.role(), Some(Role::Seller));
        assert_eq!(store.orders().unwrap(), orders);

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with('.'))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_profile_resolves_through_drafts_on_disk() {
        let dir = TempDir::new("gigbook_profile").unwrap();
        fs::write(
            dir.path().join("registration.json"),
            r#"{"firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com", "country": "UK"}"#,
        )
        .unwrap();
        let mut store = open(&dir);
        assert_eq!(store.profile().unwrap().full_name, "Ada Lovelace");

        store
            .save_onboarding_draft(&OnboardingDraft {
                profile: Some(OnboardingProfile {
                    full_name: "Ada King".to_owned(),
                    email: "ada@example.com".to_owned(),
                    ..Default::default()
                }),
            })
            .unwrap();
        assert_eq!(store.profile().unwrap().full_name, "Ada King");
        assert_eq!(
            store.registration_draft(),
            Some(RegistrationDraft {
                first_name: "Ada".to_owned(),
                last_name: "Lovelace".to_owned(),
                email: "ada@example.com".to_owned(),
                country: Some("UK".to_owned()),
            })
        );
    }

    #[test]
    fn test_statement_export_from_folder_store() {
        let dir = TempDir::new("gigbook_export").unwrap();
        let mut store = open(&dir);
        store
            .save_billing(&[
                BillingEntry {
                    date: "2024-01-10T09:30:00.000Z".to_owned(),
                    document: "Invoice".to_owned(),
                    service: "Logo \"Pro\" Design".to_owned(),
                    order: "#1001".to_owned(),
                    currency: "USD".to_owned(),
                    total: 200.0,
                },
                BillingEntry {
                    date: "2024-03-02T00:00:00.000Z".to_owned(),
                    document: "Receipt".to_owned(),
                    service: "Landing Page".to_owned(),
                    order: "#1000".to_owned(),
                    currency: "USD".to_owned(),
                    total: 12.5,
                },
            ])
            .unwrap();

        let range = DateRange::parse(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        let view = EarningsView::compute(&store.billing().unwrap(), range);
        assert_eq!(view.total, 200.0);

        let path = dir.path().join(STATEMENT_FILE_NAME);
        view.write_statement(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "\"Date\",\"Document\",\"Service\",\"Order\",\"Currency\",\"Total\"\n\
             \"2024-01-10\",\"Invoice\",\"Logo \"\"Pro\"\" Design\",\"#1001\",\"USD\",\"200\""
        );
        // The statement file sits next to the slots without becoming one.
        assert!(!store
            .substrate()
            .keys()
            .unwrap()
            .contains(&"earnings-statement".to_owned()));
    }

    #[test]
    fn test_orders_page_is_seller_only() {
        let dir = TempDir::new("gigbook_orders").unwrap();
        let mut store = open(&dir);
        store.seed_examples().unwrap();
        let orders = store.orders().unwrap();

        assert!(matches!(
            OrdersView::for_role(store.role(), &orders, OrderCategory::Late),
            Err(StoreError::SellerOnly)
        ));

        store.set_role(Role::Seller).unwrap();
        let view = OrdersView::for_role(store.role(), &orders, OrderCategory::Late).unwrap();
        assert_eq!(view.orders.len(), 1);
        assert!(view.orders.iter().all(|o| o.category == OrderCategory::Late));
    }
}
