//! Integration tests for mail client handoff links

use outreach::bulk::Job;
use outreach::mailto::{mailto_uri, parse_mailto};
use outreach::types::{GeneratedEmail, Lead};

#[test]
fn test_completed_job_links_to_lead_address() {
    let lead = Lead {
        id: "lead-1-0".to_string(),
        recipient_name: "John Doe".to_string(),
        recipient_company: "Acme Corp".to_string(),
        recipient_email: Some("john@example.com".to_string()),
        recipient_website: None,
    };
    let email = GeneratedEmail {
        subject: "Websites & AI for Acme?".to_string(),
        body: "Hi John,\n\nWould a 20% lift matter?\n\nAlex".to_string(),
    };
    let job = Job::pending(lead).start().unwrap().complete(email.clone()).unwrap();

    let uri = job.mail_uri().unwrap();
    assert_eq!(
        uri,
        "mailto:john@example.com?subject=Websites%20%26%20AI%20for%20Acme%3F\
         &body=Hi%20John%2C%0D%0A%0D%0AWould%20a%2020%25%20lift%20matter%3F%0D%0A%0D%0AAlex"
    );

    let draft = parse_mailto(&uri).unwrap();
    assert_eq!(draft.to, "john@example.com");
    assert_eq!(draft.subject, email.subject);
    assert_eq!(draft.body.replace("\r\n", "\n"), email.body);
}

#[test]
fn test_unknown_recipient_gives_blank_address() {
    let email = GeneratedEmail {
        subject: "Hello".to_string(),
        body: "Body".to_string(),
    };
    let draft = parse_mailto(&mailto_uri(None, &email)).unwrap();
    assert_eq!(draft.to, "");
    assert_eq!(draft.subject, "Hello");
}
