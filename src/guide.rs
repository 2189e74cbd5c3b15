//! Password management advice shown by the `guide` command.

pub const PASSWORD_GUIDE: &str = "\
🔐 How to Manage and Store Your Passwords

1. Use Strong Passwords:
   - At least 12 characters long
   - A mix of uppercase, lowercase, digits, and special characters
   - Avoid dictionary words and common phrases

2. Never Reuse Passwords:
   - Each account should have a unique password

3. Use a Password Manager:
   - Tools like Bitwarden, LastPass, or 1Password can generate and store strong passwords

4. Enable Two-Factor Authentication (2FA):
   - Adds a second layer of protection using your phone or email

5. Avoid Storing Passwords in Browsers:
   - Use secure password managers instead

6. Never Share Passwords via Email or Text:
   - Use secure platforms or password-sharing features in managers

7. Update Passwords Regularly:
   - Especially if there's a breach or suspected compromise

8. Backup Your Password Manager:
   - Keep a secure backup of your password vault in case of emergencies
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_has_eight_numbered_items() {
        for n in 1..=8 {
            assert!(PASSWORD_GUIDE.contains(&format!("\n{n}. ")), "missing item {n}");
        }
    }
}
