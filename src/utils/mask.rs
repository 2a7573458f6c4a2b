/// Mask the local part of an email address: first and last character kept,
/// middle replaced with a fixed-width mask, domain left intact.
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return "*****".to_string();
    };
    let chars: Vec<char> = local.chars().collect();
    match chars.len() {
        0 => format!("*****@{}", domain),
        1 => format!("{}*****@{}", chars[0], domain),
        _ => format!("{}*****{}@{}", chars[0], chars[chars.len() - 1], domain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_middle_of_local_part() {
        assert_eq!(mask_email("janedoe@x.com"), "j*****e@x.com");
        assert_eq!(mask_email("ab@x.com"), "a*****b@x.com");
    }

    #[test]
    fn short_and_malformed_addresses() {
        assert_eq!(mask_email("a@x.com"), "a*****@x.com");
        assert_eq!(mask_email("not-an-email"), "*****");
    }
}
