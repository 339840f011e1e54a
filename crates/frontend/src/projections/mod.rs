pub mod p950_ticket_items_report;
