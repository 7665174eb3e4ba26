//! Declared logical tables and their ordered column lists.

use super::{TableDef, TableRole};

pub static JOBS_MAIN: TableDef = TableDef {
    name: "Jobs_Main",
    role: TableRole::Operational,
    key: &["Job_ID"],
    columns: &[
        "Job_ID",
        "Job_Status",
        "Plan_Date",
        "Customer_ID",
        "Customer_Name",
        "Route_Name",
        "Vehicle_Type",
        "Cargo_Qty",
        "Total_Weight_kg",
        "Total_Volume_cbm",
        "Origin_Location",
        "Dest_Location",
        "Total_Drop",
        "Est_Distance_KM",
        "GoogleMap_Link",
        "Driver_ID",
        "Driver_Name",
        "Vehicle_Plate",
        "Actual_Pickup_Time",
        "Actual_Delivery_Time",
        "Arrive_Dest_Time",
        "Photo_Proof_Url",
        "Signature_Url",
        "Delivery_Lat",
        "Delivery_Lon",
        "Price_Cust_Base",
        "Price_Cust_Extra",
        "Charge_Labor",
        "Charge_Wait",
        "Price_Cust_Return",
        "Price_Cust_Fuel",
        "Price_Cust_Trailer",
        "Price_Cust_Other",
        "Price_Cust_Total",
        "Cost_Driver_Base",
        "Cost_Driver_Extra",
        "Cost_Driver_Labor",
        "Cost_Driver_Wait",
        "Cost_Driver_Return",
        "Cost_Driver_Fuel",
        "Cost_Driver_Trailer",
        "Cost_Driver_Other",
        "Cost_Driver_Total",
        "Payment_Status",
        "PD",
        "Failed_Reason",
        "Failed_Time",
        "Rating",
        "Customer_Comment",
        "Barcodes",
        "Payment_Date",
        "Payment_Slip_Url",
        "Billing_Status",
        "Invoice_No",
        "Billing_Date",
        "Branch_ID",
        "Created_At",
        "Created_By",
        "Last_Updated",
    ],
};

pub static FUEL_LOGS: TableDef = TableDef {
    name: "Fuel_Logs",
    role: TableRole::Operational,
    key: &["Log_ID"],
    columns: &[
        "Log_ID",
        "Date_Time",
        "Driver_ID",
        "Vehicle_Plate",
        "Odometer",
        "Liters",
        "Price_Total",
        "Station_Name",
        "Photo_Url",
        "Branch_ID",
        "Created_By",
    ],
};

pub static MAINTENANCE_LOGS: TableDef = TableDef {
    name: "Maintenance_Logs",
    role: TableRole::Operational,
    key: &["Log_ID"],
    columns: &[
        "Log_ID",
        "Date_Service",
        "Vehicle_Plate",
        "Service_Type",
        "Odometer",
        "Next_Due_Odometer",
        "Notes",
        "Cost",
        "Garage_Name",
        "Invoice_Ref",
    ],
};

pub static REPAIR_TICKETS: TableDef = TableDef {
    name: "Repair_Tickets",
    role: TableRole::Operational,
    key: &["Ticket_ID"],
    columns: &[
        "Ticket_ID",
        "Date_Report",
        "Driver_ID",
        "Vehicle_Plate",
        "Issue_Type",
        "Description",
        "Photo_Url",
        "Status",
        "Approver",
        "Cost_Total",
        "Date_Finish",
        "Remark",
    ],
};

pub static STOCK_PARTS: TableDef = TableDef {
    name: "Stock_Parts",
    role: TableRole::Inventory,
    key: &["Part_ID"],
    columns: &[
        "Part_ID",
        "Part_Name",
        "Part_Model",
        "Qty_On_Hand",
        "Unit_Price",
        "Min_Level",
        "Location_Shelf",
    ],
};

pub static MASTER_DRIVERS: TableDef = TableDef {
    name: "Master_Drivers",
    role: TableRole::Master,
    key: &["Driver_ID"],
    columns: &[
        "Driver_ID",
        "Driver_Name",
        "Role",
        "Mobile_No",
        "Line_User_ID",
        "Password",
        "Vehicle_Plate",
        "Vehicle_Type",
        "Max_Weight_kg",
        "Max_Volume_cbm",
        "Insurance_Expiry",
        "Tax_Expiry",
        "Act_Expiry",
        "Current_Mileage",
        "Next_Service_Mileage",
        "Last_Service_Date",
        "Bank_Name",
        "Bank_Account_No",
        "Bank_Account_Name",
        "Driver_Score",
        "Current_Lat",
        "Current_Lon",
        "Last_Update",
        "Branch_ID",
        "Active_Status",
    ],
};

pub static MASTER_CUSTOMERS: TableDef = TableDef {
    name: "Master_Customers",
    role: TableRole::Master,
    key: &["Customer_ID"],
    columns: &[
        "Customer_ID",
        "Customer_Name",
        "Default_Origin",
        "Contact_Person",
        "Phone",
        "Address",
        "Tax_ID",
        "Branch_ID",
        "Credit_Term",
        "Lat",
        "Lon",
        "GoogleMap_Link",
    ],
};

pub static MASTER_ROUTES: TableDef = TableDef {
    name: "Master_Routes",
    role: TableRole::Master,
    key: &["Route_ID"],
    columns: &[
        "Route_ID",
        "Route_Name",
        "Origin",
        "Destination",
        "Distance_KM",
        "Standard_Price_4W",
        "Standard_Price_6W",
        "Standard_Price_10W",
        "Standard_Cost_Driver",
        "Branch_ID",
    ],
};

pub static RATE_CARD: TableDef = TableDef {
    name: "Rate_Card",
    role: TableRole::Pricing,
    key: &["Distance_Start", "Distance_End"],
    columns: &[
        "Distance_Start",
        "Distance_End",
        "Price_4W",
        "Price_6W",
        "Price_10W",
        "Price_Trailer",
    ],
};

pub static MASTER_USERS: TableDef = TableDef {
    name: "Master_Users",
    role: TableRole::Master,
    key: &["Username"],
    columns: &[
        "Username",
        "Password",
        "Role",
        "Name",
        "Branch_ID",
        "Vehicle_Plate",
        "Active_Status",
    ],
};

pub static SYSTEM_CONFIG: TableDef = TableDef {
    name: "System_Config",
    role: TableRole::System,
    key: &["Key"],
    columns: &["Key", "Value", "Description", "Category"],
};

/// Declaration order; also the order `load_all` walks.
pub static ALL: &[&TableDef] = &[
    &JOBS_MAIN,
    &FUEL_LOGS,
    &MAINTENANCE_LOGS,
    &REPAIR_TICKETS,
    &STOCK_PARTS,
    &MASTER_DRIVERS,
    &MASTER_CUSTOMERS,
    &MASTER_ROUTES,
    &RATE_CARD,
    &MASTER_USERS,
    &SYSTEM_CONFIG,
];
