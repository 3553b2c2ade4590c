use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::ComplaintError;
use crate::providers::ValidationProvider;
use crate::providers::validation_provider::{REQUIRED, optional, validate_note};
use crate::stores::complaint_store::{NewComplaint, StatusChange};
use crate::stores::{CatalogStore, ComplaintStore, CustomerStore, EmployeeStore};
use crate::types::db::{ActiveStatus, ComplaintStatus, brand, complaint, product_model, product_type};
use crate::types::dto::complaint::{ComplaintSummaryResponse, RegisterComplaintRequest, UpdateComplaintStatusRequest};
use crate::types::internal::auth::{AccountKind, Principal, Role};
use crate::types::internal::business_id::{BusinessId, BusinessIdKind};
use crate::types::internal::context::RequestContext;
use crate::types::internal::validation::FieldErrors;

pub const INVALID_PRODUCT_TYPE: &str = "Select a valid product type";
pub const INVALID_BRAND: &str = "Select a brand of the chosen product type";
pub const INVALID_MODEL: &str = "Select a model of the chosen brand";
pub const INVALID_ASSIGNEE: &str = "Select an active employee";

/// Catalog entries a complaint form resolved to
struct Selection {
    product_type: product_type::Model,
    brand: brand::Model,
    model: product_model::Model,
}

/// Complaint intake workflows: the catalog cascade, registration, visibility
/// rules and status tracking
pub struct ComplaintCoordinator {
    db: DatabaseConnection,
    catalog_store: Arc<CatalogStore>,
    complaint_store: Arc<ComplaintStore>,
    customer_store: Arc<CustomerStore>,
    employee_store: Arc<EmployeeStore>,
    validation_provider: Arc<ValidationProvider>,
}

impl ComplaintCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            catalog_store: app_data.stores.catalog_store.clone(),
            complaint_store: app_data.stores.complaint_store.clone(),
            customer_store: app_data.stores.customer_store.clone(),
            employee_store: app_data.stores.employee_store.clone(),
            validation_provider: app_data.providers.validation_provider.clone(),
        }
    }

    pub async fn product_types(&self, ctx: &RequestContext) -> Result<Vec<product_type::Model>, InternalError> {
        ctx.require_role(Role::Customer)?;
        self.catalog_store.product_types(&self.db).await
    }

    pub async fn brands(&self, ctx: &RequestContext, product_type_id: i32) -> Result<Vec<brand::Model>, InternalError> {
        ctx.require_role(Role::Customer)?;
        if self.catalog_store.find_product_type(&self.db, product_type_id).await?.is_none() {
            return Err(catalog_not_found("Product type", product_type_id));
        }
        self.catalog_store.brands_for(&self.db, product_type_id).await
    }

    pub async fn models(&self, ctx: &RequestContext, brand_id: i32) -> Result<Vec<product_model::Model>, InternalError> {
        ctx.require_role(Role::Customer)?;
        if self.catalog_store.find_brand(&self.db, brand_id).await?.is_none() {
            return Err(catalog_not_found("Brand", brand_id));
        }
        self.catalog_store.models_for(&self.db, brand_id).await
    }

    /// Book a complaint for the caller
    ///
    /// Coordinates the sequence of operations:
    /// 1. Check authorization (requires ROLE_CUSTOMER)
    /// 2. Validate the form and resolve the product cascade
    /// 3. Fill missing contact fields from the caller's customer record
    /// 4. Insert the complaint as OPEN with the catalog names snapshotted
    ///
    /// Staff booking on a customer's behalf must supply every contact field.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        form: RegisterComplaintRequest,
    ) -> Result<complaint::Model, InternalError> {
        let principal = ctx.require_role(Role::Customer)?;

        let mut errors = FieldErrors::new();
        let details = match self.validation_provider.complaint(&form) {
            Ok(details) => Some(details),
            Err(form_errors) => {
                errors.merge(form_errors);
                None
            }
        };

        let txn = begin_transaction(&self.db, "register_complaint").await?;
        let selection = self
            .resolve_selection(&txn, &mut errors, form.product_type_id, form.brand_id, form.model_id)
            .await?;

        let defaults = self.contact_defaults(&txn, principal).await?;
        let details = details.map(|details| {
            let (name, phone, address) = match &defaults {
                Some(customer) => (
                    details.contact_name.or_else(|| Some(customer.full_name())),
                    details.contact_phone.or_else(|| Some(customer.phone.clone())),
                    details.service_address.or_else(|| Some(customer.address.clone())),
                ),
                None => (details.contact_name, details.contact_phone, details.service_address),
            };
            for (field, value) in [("contact_name", &name), ("contact_phone", &phone), ("service_address", &address)] {
                if value.is_none() {
                    errors.add(field, REQUIRED);
                }
            }
            (details.serial_number, details.description, name, phone, address)
        });

        let (Some((serial_number, description, Some(name), Some(phone), Some(address))), Some(selection)) =
            (details, selection)
        else {
            return Err(errors.into());
        };
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let complaint = self
            .complaint_store
            .insert(
                &txn,
                NewComplaint {
                    product_type: selection.product_type.name,
                    brand: selection.brand.name,
                    model: selection.model.name,
                    serial_number,
                    description,
                    contact_name: name,
                    contact_phone: phone,
                    service_address: address,
                    booked_by: principal.user_id.clone(),
                },
            )
            .await?;
        commit_transaction(txn, "register_complaint").await?;

        tracing::info!(complaint_id = %complaint.complaint_id(), booked_by = %principal.user_id, "Complaint registered");
        Ok(complaint)
    }

    /// Employees see every complaint; everyone else only their own bookings
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<ComplaintStatus>,
    ) -> Result<Vec<complaint::Model>, InternalError> {
        let principal = ctx.require_role(Role::Customer)?;
        let booked_by = (!principal.has_role(Role::Employee)).then_some(principal.user_id.as_str());
        self.complaint_store.list(&self.db, status, booked_by).await
    }

    /// Someone else's complaint reads as not found for non-staff callers
    pub async fn get(&self, ctx: &RequestContext, complaint_id: &str) -> Result<complaint::Model, InternalError> {
        let principal = ctx.require_role(Role::Customer)?;
        let ref_id = parse_complaint_id(complaint_id)?;

        let complaint = self
            .complaint_store
            .find_by_ref_id(&self.db, ref_id)
            .await?
            .ok_or_else(|| ComplaintError::NotFound(complaint_id.to_string()))?;

        if !principal.has_role(Role::Employee) && complaint.booked_by != principal.user_id {
            return Err(ComplaintError::NotFound(complaint_id.to_string()).into());
        }
        Ok(complaint)
    }

    /// Move a complaint forward
    ///
    /// IN_PROGRESS needs an assignee: the given active employee, or the
    /// calling employee when none is given. RESOLVED needs a resolution note.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        complaint_id: &str,
        form: UpdateComplaintStatusRequest,
    ) -> Result<complaint::Model, InternalError> {
        let principal = ctx.require_role(Role::Employee)?;
        let ref_id = parse_complaint_id(complaint_id)?;

        let txn = begin_transaction(&self.db, "update_complaint_status").await?;
        let existing = self
            .complaint_store
            .find_by_ref_id(&txn, ref_id)
            .await?
            .ok_or_else(|| ComplaintError::NotFound(complaint_id.to_string()))?;

        if !existing.status.can_transition_to(form.status) {
            return Err(ComplaintError::InvalidTransition {
                from: existing.status.as_str().to_string(),
                to: form.status.as_str().to_string(),
            }
            .into());
        }

        let mut errors = FieldErrors::new();
        let assigned_to = match optional(&form.assigned_to) {
            Some(employee_id) => self.active_employee(&txn, &mut errors, employee_id).await?,
            None if form.status == ComplaintStatus::InProgress && existing.assigned_to.is_none() => {
                if principal.account_kind == AccountKind::Employee {
                    Some(principal.user_id.clone())
                } else {
                    errors.add("assigned_to", REQUIRED);
                    None
                }
            }
            None => None,
        };

        let resolution_note = match (form.status, optional(&form.resolution_note)) {
            (ComplaintStatus::Resolved, Some(note)) => errors.check("resolution_note", validate_note(note)),
            (ComplaintStatus::Resolved, None) => {
                errors.add("resolution_note", REQUIRED);
                None
            }
            (_, note) => note.and_then(|note| errors.check("resolution_note", validate_note(note))),
        };
        errors.into_result()?;

        let complaint = self
            .complaint_store
            .update_status(
                &txn,
                existing,
                StatusChange {
                    status: form.status,
                    assigned_to,
                    resolution_note,
                },
            )
            .await?;
        commit_transaction(txn, "update_complaint_status").await?;

        tracing::info!(
            complaint_id = %complaint.complaint_id(),
            status = complaint.status.as_str(),
            actor = %ctx.actor_id,
            "Complaint status changed"
        );
        Ok(complaint)
    }

    pub async fn summary(&self, ctx: &RequestContext) -> Result<ComplaintSummaryResponse, InternalError> {
        ctx.require_role(Role::Employee)?;
        let counts = self.complaint_store.count_by_status(&self.db).await?;

        Ok(ComplaintSummaryResponse {
            open: counts.open,
            in_progress: counts.in_progress,
            resolved: counts.resolved,
            total: counts.open + counts.in_progress + counts.resolved,
        })
    }

    /// Check the product type → brand → model chain, recording a field error per broken link
    async fn resolve_selection(
        &self,
        conn: &impl ConnectionTrait,
        errors: &mut FieldErrors,
        product_type_id: i32,
        brand_id: i32,
        model_id: i32,
    ) -> Result<Option<Selection>, InternalError> {
        let product_type = if product_type_id > 0 {
            let found = self.catalog_store.find_product_type(conn, product_type_id).await?;
            if found.is_none() {
                errors.add("product_type_id", INVALID_PRODUCT_TYPE);
            }
            found
        } else {
            None
        };

        let brand = if brand_id > 0 {
            let found = self
                .catalog_store
                .find_brand(conn, brand_id)
                .await?
                .filter(|brand| brand.product_type_id == product_type_id);
            if found.is_none() {
                errors.add("brand_id", INVALID_BRAND);
            }
            found
        } else {
            None
        };

        let model = if model_id > 0 {
            let found = self
                .catalog_store
                .find_model(conn, model_id)
                .await?
                .filter(|model| model.brand_id == brand_id);
            if found.is_none() {
                errors.add("model_id", INVALID_MODEL);
            }
            found
        } else {
            None
        };

        Ok(match (product_type, brand, model) {
            (Some(product_type), Some(brand), Some(model)) => Some(Selection {
                product_type,
                brand,
                model,
            }),
            _ => None,
        })
    }

    /// The caller's customer record, used to fill omitted contact fields
    async fn contact_defaults(
        &self,
        conn: &impl ConnectionTrait,
        principal: &Principal,
    ) -> Result<Option<crate::types::db::customer::Model>, InternalError> {
        if principal.account_kind != AccountKind::Customer {
            return Ok(None);
        }
        match BusinessId::parse(BusinessIdKind::Customer, &principal.user_id) {
            Ok(id) => self.customer_store.find_by_ref_id(conn, id.ref_id).await,
            Err(_) => Ok(None),
        }
    }

    async fn active_employee(
        &self,
        conn: &impl ConnectionTrait,
        errors: &mut FieldErrors,
        employee_id: &str,
    ) -> Result<Option<String>, InternalError> {
        let employee = match BusinessId::parse(BusinessIdKind::Employee, employee_id) {
            Ok(id) => self.employee_store.find_by_ref_id(conn, id.ref_id).await?,
            Err(_) => None,
        };

        match employee {
            Some(employee) if employee.status == ActiveStatus::Active => Ok(Some(employee.employee_id())),
            _ => {
                errors.add("assigned_to", INVALID_ASSIGNEE);
                Ok(None)
            }
        }
    }
}

fn parse_complaint_id(complaint_id: &str) -> Result<i32, InternalError> {
    BusinessId::parse(BusinessIdKind::Complaint, complaint_id.trim())
        .map(|id| id.ref_id)
        .map_err(|_| ComplaintError::NotFound(complaint_id.to_string()).into())
}

fn catalog_not_found(entry: &str, id: i32) -> InternalError {
    ComplaintError::CatalogEntryNotFound {
        entry: entry.to_string(),
        id,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinators::{CustomerCoordinator, EmployeeCoordinator, OwnerCoordinator};
    use crate::errors::internal::AccessError;
    use crate::test::utils::{context_for, customer_form, employee_form, owner_form, setup_test_app_data};

    struct Fixture {
        coordinator: ComplaintCoordinator,
        owner: RequestContext,
        employee: RequestContext,
        customer: RequestContext,
        other_customer: RequestContext,
    }

    async fn fixture() -> Fixture {
        let app_data = setup_test_app_data().await;
        let owner = OwnerCoordinator::new(app_data.clone())
            .bootstrap(&RequestContext::for_cli("bootstrap-owner"), owner_form(1))
            .await
            .unwrap();
        let owner_ctx = context_for(&app_data, &owner.owner_id()).await;
        let employee = EmployeeCoordinator::new(app_data.clone())
            .register(&owner_ctx, employee_form(10))
            .await
            .unwrap();
        let customers = CustomerCoordinator::new(app_data.clone());
        let system = RequestContext::for_system("test");
        let customer = customers.register(&system, customer_form(20)).await.unwrap();
        let other = customers.register(&system, customer_form(21)).await.unwrap();

        Fixture {
            coordinator: ComplaintCoordinator::new(app_data.clone()),
            employee: context_for(&app_data, &employee.employee_id()).await,
            customer: context_for(&app_data, &customer.customer_id()).await,
            other_customer: context_for(&app_data, &other.customer_id()).await,
            owner: owner_ctx,
        }
    }

    /// Refrigerator / Whirlpool / IntelliFresh 240L
    fn whirlpool_form() -> RegisterComplaintRequest {
        RegisterComplaintRequest {
            product_type_id: 1,
            brand_id: 1,
            model_id: 1,
            description: "Fridge not cooling since yesterday".to_string(),
            ..RegisterComplaintRequest::default()
        }
    }

    fn status(status: ComplaintStatus, assigned_to: Option<&str>, note: Option<&str>) -> UpdateComplaintStatusRequest {
        UpdateComplaintStatusRequest {
            status,
            assigned_to: assigned_to.map(str::to_string),
            resolution_note: note.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_catalog_cascade() {
        let f = fixture().await;

        let types = f.coordinator.product_types(&f.customer).await.unwrap();
        assert_eq!(types.len(), 4);

        let brands = f.coordinator.brands(&f.customer, 1).await.unwrap();
        let names: Vec<&str> = brands.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Godrej", "LG", "Whirlpool"]);

        assert!(matches!(
            f.coordinator.models(&f.customer, 999).await,
            Err(InternalError::Complaint(ComplaintError::CatalogEntryNotFound { .. }))
        ));
        assert!(matches!(
            f.coordinator.product_types(&RequestContext::for_system("test")).await,
            Err(InternalError::Access(AccessError::Unauthenticated))
        ));
    }

    #[tokio::test]
    async fn test_customer_booking_defaults_contact_details() {
        let f = fixture().await;

        let complaint = f.coordinator.register(&f.customer, whirlpool_form()).await.unwrap();

        assert_eq!(complaint.complaint_id(), "SRW0000001");
        assert_eq!(complaint.status, ComplaintStatus::Open);
        assert_eq!(complaint.product_type, "Refrigerator");
        assert_eq!(complaint.brand, "Whirlpool");
        assert_eq!(complaint.model, "IntelliFresh 240L");
        assert_eq!(complaint.contact_name, "Asha Rao");
        assert_eq!(complaint.contact_phone, "+919845000020");
        assert_eq!(complaint.booked_by, "CUS0000001");
    }

    #[tokio::test]
    async fn test_cascade_mismatch_is_reported_per_field() {
        let f = fixture().await;

        // LG (3) belongs to Refrigerator, not Deep Freezer (2); model 8 is a Voltas freezer
        let form = RegisterComplaintRequest {
            product_type_id: 2,
            brand_id: 3,
            model_id: 8,
            ..whirlpool_form()
        };

        match f.coordinator.register(&f.customer, form).await {
            Err(InternalError::Validation(errors)) => {
                assert!(!errors.has_field("product_type_id"));
                assert_eq!(errors.message_for("brand_id"), Some(INVALID_BRAND));
                assert_eq!(errors.message_for("model_id"), Some(INVALID_MODEL));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_staff_booking_requires_contact_fields() {
        let f = fixture().await;

        match f.coordinator.register(&f.employee, whirlpool_form()).await {
            Err(InternalError::Validation(errors)) => {
                assert_eq!(errors.message_for("contact_name"), Some(REQUIRED));
                assert_eq!(errors.message_for("contact_phone"), Some(REQUIRED));
                assert_eq!(errors.message_for("service_address"), Some(REQUIRED));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }

        let form = RegisterComplaintRequest {
            contact_name: Some("Kiran Shah".to_string()),
            contact_phone: Some("9900112233".to_string()),
            service_address: Some("88 Church Street".to_string()),
            ..whirlpool_form()
        };
        let complaint = f.coordinator.register(&f.employee, form).await.unwrap();
        assert_eq!(complaint.contact_phone, "+919900112233");
        assert_eq!(complaint.booked_by, "EMP0000001");
    }

    #[tokio::test]
    async fn test_visibility_of_other_customers_complaints() {
        let f = fixture().await;
        let complaint = f.coordinator.register(&f.customer, whirlpool_form()).await.unwrap();
        let id = complaint.complaint_id();

        assert!(f.coordinator.get(&f.customer, &id).await.is_ok());
        assert!(f.coordinator.get(&f.employee, &id).await.is_ok());
        assert!(f.coordinator.get(&f.owner, &id).await.is_ok());
        assert!(matches!(
            f.coordinator.get(&f.other_customer, &id).await,
            Err(InternalError::Complaint(ComplaintError::NotFound(_)))
        ));

        assert_eq!(f.coordinator.list(&f.customer, None).await.unwrap().len(), 1);
        assert!(f.coordinator.list(&f.other_customer, None).await.unwrap().is_empty());
        assert_eq!(f.coordinator.list(&f.employee, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let f = fixture().await;
        let id = f.coordinator.register(&f.customer, whirlpool_form()).await.unwrap().complaint_id();

        assert!(matches!(
            f.coordinator
                .update_status(&f.customer, &id, status(ComplaintStatus::InProgress, None, None))
                .await,
            Err(InternalError::Access(AccessError::Forbidden { .. }))
        ));

        // owners are not employees, so they must name the technician
        match f
            .coordinator
            .update_status(&f.owner, &id, status(ComplaintStatus::InProgress, None, None))
            .await
        {
            Err(InternalError::Validation(errors)) => assert_eq!(errors.message_for("assigned_to"), Some(REQUIRED)),
            other => panic!("Expected Validation, got {:?}", other),
        }

        let in_progress = f
            .coordinator
            .update_status(&f.employee, &id, status(ComplaintStatus::InProgress, None, None))
            .await
            .unwrap();
        assert_eq!(in_progress.assigned_to.as_deref(), Some("EMP0000001"));

        match f
            .coordinator
            .update_status(&f.employee, &id, status(ComplaintStatus::Resolved, None, None))
            .await
        {
            Err(InternalError::Validation(errors)) => {
                assert_eq!(errors.message_for("resolution_note"), Some(REQUIRED))
            }
            other => panic!("Expected Validation, got {:?}", other),
        }

        let resolved = f
            .coordinator
            .update_status(
                &f.employee,
                &id,
                status(ComplaintStatus::Resolved, None, Some("Replaced thermostat")),
            )
            .await
            .unwrap();
        assert_eq!(resolved.status, ComplaintStatus::Resolved);
        assert!(resolved.resolved_at.is_some());

        assert!(matches!(
            f.coordinator
                .update_status(&f.employee, &id, status(ComplaintStatus::InProgress, None, None))
                .await,
            Err(InternalError::Complaint(ComplaintError::InvalidTransition { .. }))
        ));

        let summary = f.coordinator.summary(&f.employee).await.unwrap();
        assert_eq!(summary.resolved, 1);
        assert_eq!(summary.total, 1);
    }

    #[tokio::test]
    async fn test_unknown_assignee_is_a_field_error() {
        let f = fixture().await;
        let id = f.coordinator.register(&f.customer, whirlpool_form()).await.unwrap().complaint_id();

        match f
            .coordinator
            .update_status(&f.owner, &id, status(ComplaintStatus::InProgress, Some("EMP0000042"), None))
            .await
        {
            Err(InternalError::Validation(errors)) => {
                assert_eq!(errors.message_for("assigned_to"), Some(INVALID_ASSIGNEE))
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }
}
