// Bootstrap command implementation
// Creates the first owner account during system setup

use std::sync::Arc;

use clap::Args;

use crate::app_data::AppData;
use crate::coordinators::OwnerCoordinator;
use crate::errors::InternalError;
use crate::types::dto::owner::RegisterOwnerRequest;
use crate::types::internal::context::RequestContext;

/// Details of the first owner; the password is generated
#[derive(Args, Debug, Clone)]
pub struct BootstrapOwnerArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    /// 12-digit national identity number
    #[arg(long)]
    pub national_id: String,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub username: String,
}

impl BootstrapOwnerArgs {
    fn into_request(self, password: String) -> RegisterOwnerRequest {
        RegisterOwnerRequest {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            national_id: self.national_id,
            address: self.address,
            username: self.username,
            confirm_password: password.clone(),
            password,
        }
    }
}

/// Create the first owner when none exists and print its password once
pub async fn bootstrap_owner(app_data: Arc<AppData>, args: BootstrapOwnerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("bootstrap-owner");
    let password = app_data.providers.crypto_provider.generate_secure_password();
    let username = args.username.clone();

    let owner = match OwnerCoordinator::new(app_data.clone())
        .bootstrap(&ctx, args.into_request(password.clone()))
        .await
    {
        Ok(owner) => owner,
        Err(InternalError::Validation(errors)) => {
            eprintln!("Owner details were rejected:");
            for error in errors.iter() {
                eprintln!("  {}: {}", error.field, error.message);
            }
            return Err("bootstrap-owner failed validation".into());
        }
        Err(e) => return Err(e.into()),
    };

    println!("\n=== Frostcare Bootstrap ===\n");
    println!("Owner ID:  {}", owner.owner_id());
    println!("Username:  {}", username.trim());
    println!("Password:  {}", password);
    println!("\nStore this password now; it will not be shown again.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::AccountError;
    use crate::test::utils::setup_test_app_data;

    fn args() -> BootstrapOwnerArgs {
        BootstrapOwnerArgs {
            first_name: "Meera".to_string(),
            last_name: "Iyer".to_string(),
            email: "meera@frostcare.in".to_string(),
            phone: "9845000001".to_string(),
            national_id: "500000000001".to_string(),
            address: "14 Residency Road, Bengaluru".to_string(),
            username: "meera".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generated_password_logs_in() {
        let app_data = setup_test_app_data().await;
        let password = app_data.providers.crypto_provider.generate_secure_password();

        OwnerCoordinator::new(app_data.clone())
            .bootstrap(&RequestContext::for_cli("bootstrap-owner"), args().into_request(password.clone()))
            .await
            .unwrap();

        let credential = app_data
            .stores
            .credential_store
            .find_by_username(&app_data.db, "meera")
            .await
            .unwrap()
            .unwrap();
        assert!(
            app_data
                .providers
                .password_provider
                .verify_password(&credential.password_hash, &password)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_second_bootstrap_is_refused() {
        let app_data = setup_test_app_data().await;
        bootstrap_owner(app_data.clone(), args()).await.unwrap();

        let mut second = args();
        second.username = "meera2".to_string();
        let result = OwnerCoordinator::new(app_data.clone())
            .bootstrap(&RequestContext::for_cli("bootstrap-owner"), second.into_request("frost2024cool".to_string()))
            .await;
        assert!(matches!(result, Err(InternalError::Account(AccountError::OwnerExists))));
    }
}
