use rtf_api::{ApiError, ApiFacade, OperationKind};
use rtf_model::{
    Client, Folder, HttpMethod, InstanceSetting, ParentContext, RestError, ScriptedRestService,
    Tab,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

const WORKSPACE: ParentContext = ParentContext::Workspace(1234567);
const TABS: &str = "relativity-data-visualization/v1/workspaces/1234567/tabs";
const WORKSPACE_QUERY: &str = "Relativity.ObjectManager/v1/workspace/1234567/object/query";
const ADMIN_QUERY: &str = "Relativity.ObjectManager/v1/workspace/-1/object/query";
const FOLDER_MANAGER: &str = "Relativity.Services.Folder.IFolderModule/Folder Manager";
const CLIENT_MANAGER: &str = "Relativity.Services.Client.IClientModule/Client Manager";
const SETTING_MANAGER: &str =
    "Relativity.Services.InstanceSetting.IInstanceSettingModule/Instance Setting Manager";

fn facade(rest: &Arc<ScriptedRestService>) -> ApiFacade {
    ApiFacade::from_rest(rest.clone())
}

#[tokio::test]
async fn test_tab_require_creates_through_rest() {
    let rest = Arc::new(
        ScriptedRestService::new()
            .respond(HttpMethod::Post, WORKSPACE_QUERY, json!({ "Objects": [] }))
            .respond(HttpMethod::Post, TABS, json!(1041))
            .respond(
                HttpMethod::Get,
                format!("{}/1041", TABS),
                json!({ "ArtifactID": 1041, "Name": "MySpecialTab", "LinkType": "Parent" }),
            ),
    );

    let tab = facade(&rest)
        .tabs()
        .require(WORKSPACE, Tab::named("MySpecialTab"))
        .await
        .unwrap();

    assert_eq!(tab.artifact_id, 1041);
    let endpoints: Vec<String> = rest.calls().into_iter().map(|call| call.endpoint).collect();
    assert_eq!(
        endpoints,
        vec![
            WORKSPACE_QUERY.to_string(),
            TABS.to_string(),
            format!("{}/1041", TABS)
        ]
    );
}

#[tokio::test]
async fn test_tab_create_failure_names_the_step() {
    let rest = Arc::new(
        ScriptedRestService::new()
            .respond(HttpMethod::Post, WORKSPACE_QUERY, json!({ "Objects": [] }))
            .on(HttpMethod::Post, TABS, |_| Err(RestError::http(500, "tab service down"))),
    );

    let err = facade(&rest)
        .tabs()
        .require(WORKSPACE, Tab::named("Reports"))
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(OperationKind::Create));
    assert_eq!(
        err.to_string(),
        "create of Tab in workspace 1234567 failed: HTTP 500: tab service down"
    );
}

#[tokio::test]
async fn test_tab_require_by_missing_id_reports_not_found() {
    let rest = Arc::new(ScriptedRestService::new());

    let err = facade(&rest)
        .tabs()
        .require(WORKSPACE, Tab::with_id(999))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NotFound { artifact_id: 999, .. }));
    assert_eq!(rest.call_count(), 1);
    assert_eq!(rest.calls_to(&format!("{}/999", TABS)), 1);
}

#[tokio::test]
async fn test_folder_tree_maps_nested_payload() {
    let rest = Arc::new(ScriptedRestService::new().respond(
        HttpMethod::Post,
        format!("{}/GetFolderTreeAsync", FOLDER_MANAGER),
        json!([{
            "ArtifactID": 1003697,
            "Name": "Root",
            "HasChildren": true,
            "Children": [
                {
                    "ArtifactID": 1,
                    "Name": "A",
                    "Children": [{ "ArtifactID": 3, "Name": "A1", "ParentFolder": { "ArtifactID": 1 } }]
                },
                { "ArtifactID": 2, "Name": "B", "Children": null }
            ]
        }]),
    ));

    let tree = facade(&rest)
        .folders()
        .get_folder_tree(WORKSPACE, &[1], Some(3))
        .await
        .unwrap();

    assert_eq!(tree.len(), 1);
    let walk: Vec<(usize, &str)> = tree[0]
        .depth_first()
        .into_iter()
        .map(|(depth, folder)| (depth, folder.name.as_str()))
        .collect();
    assert_eq!(walk, vec![(0, "Root"), (1, "A"), (2, "A1"), (1, "B")]);
    assert_eq!(tree[0].find(3).and_then(|f| f.parent_id()), Some(1));
    assert!(tree[0].find(2).unwrap().children.is_empty());

    let body = rest.calls()[0].body.clone().unwrap();
    assert_eq!(body["expandedNodes"], json!([1]));
    assert_eq!(body["selectedFolderId"], 3);
}

#[tokio::test]
async fn test_folder_require_mapping_failure_names_step_and_context() {
    let rest = Arc::new(ScriptedRestService::new().respond(
        HttpMethod::Post,
        format!("{}/ReadSingleAsync", FOLDER_MANAGER),
        json!({ "ArtifactID": 5, "Name": "Broken", "Children": [null] }),
    ));

    let mut folder = Folder::named("Broken");
    folder.artifact_id = 5;

    let err = facade(&rest)
        .folders()
        .require(WORKSPACE, folder)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Mapping { entity: "Folder", .. }));
    let at = err.location().unwrap();
    assert_eq!(at.step, OperationKind::GetById);
    assert_eq!(at.entity, "Folder");
    assert_eq!(at.context, WORKSPACE);
    assert!(err.to_string().starts_with("get-by-id of Folder in workspace 1234567 failed: "));
    assert_eq!(rest.calls_to("UpdateSingleAsync"), 0);
}

#[tokio::test]
async fn test_client_create_without_active_choice_names_the_step() {
    let rest = Arc::new(ScriptedRestService::new().respond(
        HttpMethod::Post,
        format!("{}/GetStatusChoicesForClientAsync", CLIENT_MANAGER),
        json!([{ "ArtifactID": 663, "Name": "Inactive" }]),
    ));

    let err = facade(&rest)
        .clients()
        .create(ParentContext::Admin, Client::named("Acme"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::ObjectNotFound { .. }));
    assert_eq!(err.step(), Some(OperationKind::Create));
    assert_eq!(err.location().map(|at| at.context), Some(ParentContext::Admin));
    assert_eq!(rest.calls_to("CreateSingleAsync"), 0);
}

#[tokio::test]
async fn test_client_create_fills_active_status() {
    let rest = Arc::new(
        ScriptedRestService::new()
            .respond(
                HttpMethod::Post,
                format!("{}/GetStatusChoicesForClientAsync", CLIENT_MANAGER),
                json!([{ "ArtifactID": 662, "Name": "Active" }]),
            )
            .respond(
                HttpMethod::Post,
                format!("{}/CreateSingleAsync", CLIENT_MANAGER),
                json!(1017),
            )
            .respond(
                HttpMethod::Post,
                format!("{}/ReadSingleAsync", CLIENT_MANAGER),
                json!({ "ArtifactID": 1017, "Name": "Acme", "Status": { "ArtifactID": 662 } }),
            ),
    );
    let clients = facade(&rest).clients();

    assert_eq!(clients.get_status_choice_id("Active").await.unwrap(), 662);
    let missing = clients.get_status_choice_id("Frozen").await.unwrap_err();
    assert!(matches!(missing, ApiError::ObjectNotFound { .. }));

    let client = clients
        .create(ParentContext::Admin, Client::named("Acme"))
        .await
        .unwrap();
    assert_eq!(client.status.map(|s| s.artifact_id), Some(662));
}

#[tokio::test]
async fn test_instance_setting_require_uses_name_and_section() {
    let rest = Arc::new(
        ScriptedRestService::new()
            .on(HttpMethod::Post, ADMIN_QUERY, |request| {
                let body = request.body.clone().unwrap_or_default();
                let condition = body["request"]["condition"].as_str().unwrap_or_default();
                assert!(condition.contains("'Section' == 'Relativity.Core'"));
                Ok(json!({ "Objects": [{ "ArtifactID": 1100 }] }))
            })
            .respond(
                HttpMethod::Post,
                format!("{}/UpdateSingleAsync", SETTING_MANAGER),
                Value::Null,
            )
            .respond(
                HttpMethod::Post,
                format!("{}/ReadSingleAsync", SETTING_MANAGER),
                json!({ "ArtifactID": 1100, "Name": "MaxRows", "Section": "Relativity.Core", "Value": "20" }),
            ),
    );

    let setting = facade(&rest)
        .instance_settings()
        .require(ParentContext::Admin, InstanceSetting::new("MaxRows", "", "20"))
        .await
        .unwrap();

    assert_eq!(setting.artifact_id, 1100);
    assert_eq!(setting.value, "20");
    assert_eq!(rest.calls_to("CreateSingleAsync"), 0);
    assert_eq!(rest.calls_to("UpdateSingleAsync"), 1);
}

#[tokio::test]
async fn test_import_of_missing_file_is_rejected_locally() {
    let rest = Arc::new(ScriptedRestService::new());

    let err = facade(&rest)
        .documents()
        .import_images_from_csv(WORKSPACE, Path::new("/no/such/images.csv"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation { .. }));
    assert_eq!(rest.call_count(), 0);
}

#[tokio::test]
async fn test_imaging_retry_and_motd() {
    let rest = Arc::new(
        ScriptedRestService::new()
            .respond(
                HttpMethod::Post,
                "relativity-imaging/v1/workspaces/1234567/imaging-sets/1038/retry-errors",
                json!({ "ImagingJobID": 77 }),
            )
            .respond(
                HttpMethod::Post,
                "Relativity.Services.MOTD.IMOTDModule/MOTD Manager/IsTextOnlyAsync",
                json!(false),
            ),
    );
    let api = facade(&rest);

    assert_eq!(
        api.imaging_jobs().retry_errors(WORKSPACE, 1038, None).await.unwrap(),
        77
    );
    assert!(!api.motd().is_text_only().await.unwrap());

    let err = api.motd().clear().await.unwrap_err();
    assert_eq!(err.step(), Some(OperationKind::Clear));
}
