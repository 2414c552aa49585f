//! Fixed demo data the service starts with.
use crate::chat::{ChatBook, ChatMessage, ChatThread, Presence, Sender};
use crate::item::{Category, ItemRecord, ReportKind};

#[allow(clippy::too_many_arguments)]
fn item(
    id: u64,
    kind: ReportKind,
    title: &str,
    description: &str,
    location: &str,
    reported_at: &str,
    category: Category,
    condition: &str,
    image: &str,
    color: &str,
    brand: &str,
    size: &str,
) -> ItemRecord {
    ItemRecord {
        id,
        kind,
        title: title.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        reported_at: reported_at.to_string(),
        category,
        condition: condition.to_string(),
        color: color.to_string(),
        brand: brand.to_string(),
        size: size.to_string(),
        image: Some(image.to_string()),
    }
}

/// The six reports every fresh catalog is seeded with.
pub fn demo_items() -> Vec<ItemRecord> {
    use Category::*;
    use ReportKind::*;

    vec![
        item(
            1,
            Lost,
            "Black Leather Wallet",
            "Bifold wallet with multiple card slots, contains family photos",
            "Downtown Area",
            "2 days ago",
            Accessories,
            "Good",
            "/black-leather-wallet.jpg",
            "Black",
            "Coach",
            "Standard",
        ),
        item(
            2,
            Found,
            "Dark Wallet",
            "Leather wallet found near main street, excellent condition",
            "Main Street",
            "1 day ago",
            Accessories,
            "Excellent",
            "/dark-leather-wallet.jpg",
            "Brown",
            "Generic",
            "Standard",
        ),
        item(
            3,
            Lost,
            "Blue Backpack",
            "North Face backpack with laptop compartment, important documents inside",
            "Train Station",
            "5 days ago",
            Bags,
            "Good",
            "/blue-north-face-backpack.jpg",
            "Blue",
            "The North Face",
            "Large",
        ),
        item(
            4,
            Found,
            "Navy Backpack",
            "Large backpack with side pockets found at train station",
            "Train Station",
            "3 days ago",
            Bags,
            "Good",
            "/navy-backpack.jpg",
            "Navy",
            "Unknown",
            "Large",
        ),
        item(
            5,
            Lost,
            "Silver Watch",
            "Apple Watch Series 7 with sport band, last seen at mall",
            "Shopping Mall",
            "1 week ago",
            Electronics,
            "Excellent",
            "/apple-watch-silver.jpg",
            "Silver",
            "Apple",
            "42mm",
        ),
        item(
            6,
            Found,
            "Smartwatch",
            "Silver smartwatch found in mall food court, working condition",
            "Shopping Mall",
            "4 days ago",
            Electronics,
            "Excellent",
            "/silver-smartwatch.jpg",
            "Silver",
            "Apple",
            "42mm",
        ),
    ]
}

fn message(id: u32, sender: &str, text: &str, time: &str, read: bool) -> ChatMessage {
    ChatMessage {
        id,
        sender: Sender::from(sender.to_string()),
        text: text.to_string(),
        time: time.to_string(),
        read,
    }
}

/// The three demo conversations every new viewer starts with.
pub fn demo_chats() -> ChatBook {
    ChatBook::new(vec![
        ChatThread {
            id: 1,
            peer_name: "John Doe".into(),
            item: "Black Wallet".into(),
            avatar: Some("/male-user-avatar.jpg".into()),
            last_message: "I can meet tomorrow at the coffee shop".into(),
            timestamp: "2 min ago".into(),
            unread: 2,
            presence: Presence::Online,
            messages: vec![
                message(1, "John", "Hi! I think I found your wallet", "10:30 AM", true),
                message(2, "You", "Really?? Where did you find it?", "10:32 AM", true),
                message(3, "John", "Near the downtown area, by the parking lot", "10:35 AM", true),
                message(4, "You", "That sounds right! How can we meet?", "10:37 AM", true),
                message(5, "John", "I can meet tomorrow at the coffee shop", "10:40 AM", false),
            ],
        },
        ChatThread {
            id: 2,
            peer_name: "Jane Smith".into(),
            item: "Silver Keychain".into(),
            avatar: Some("/female-user-avatar.jpg".into()),
            last_message: "Yes, I still have it".into(),
            timestamp: "1 hour ago".into(),
            unread: 0,
            presence: Presence::Offline,
            messages: vec![
                message(1, "Jane", "Hi, do you have keys on your keychain?", "9:00 AM", true),
                message(2, "You", "Yes! I lost a silver keychain with my keys", "9:05 AM", true),
                message(3, "Jane", "Yes, I still have it", "9:10 AM", true),
            ],
        },
        ChatThread {
            id: 3,
            peer_name: "Mike Johnson".into(),
            item: "Blue Backpack".into(),
            avatar: Some("/male-user-avatar.jpg".into()),
            last_message: "I can describe what was inside...".into(),
            timestamp: "5 hours ago".into(),
            unread: 0,
            presence: Presence::Online,
            messages: vec![
                message(1, "Mike", "I found a blue backpack at the train station", "5:00 AM", true),
                message(2, "You", "That might be mine! Does it have a laptop?", "5:15 AM", true),
                message(3, "Mike", "I can describe what was inside...", "5:20 AM", true),
            ],
        },
    ])
}
