use crate::domain::{AuthUser, Role};

struct DemoAccount {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: Role,
}

const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        id: "1",
        name: "Admin User",
        email: "admin@luxora.com",
        password: "admin123",
        role: Role::Admin,
    },
    DemoAccount {
        id: "2",
        name: "John Doe",
        email: "user@luxora.com",
        password: "user123",
        role: Role::User,
    },
];

/// Checks the credentials against the built-in demo accounts. Emails and
/// passwords must match exactly.
pub fn authenticate(email: &str, password: &str) -> Option<AuthUser> {
    DEMO_ACCOUNTS
        .iter()
        .find(|account| account.email == email && account.password == password)
        .map(|account| AuthUser::new(account.id, account.name, account.email, account.role))
}
